//! # Messages
//!
//! Reply lines for list commands, and the preformatted wrapper every reply goes out in.

/// The fence is longer than any backtick run in `body`, so items holding
/// backticks cannot close the block early.
pub fn preformatted(body: &str) -> String {
    let longest_run = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}\n{}\n{fence}", body.trim_end_matches('\n'))
}

pub fn added(item: &str, list: &str) -> String {
    format!("Added: {item} to {list}")
}

pub fn created_and_added(item: &str, list: &str) -> String {
    format!("Created List: {list}\nAdded: {item} to {list}")
}

pub fn add_failed(item: &str) -> String {
    format!("Error - Could not add {item}")
}

pub fn item_removed(item: &str, list: &str) -> String {
    format!("Removed: {item} from {list}")
}

pub fn item_not_found(item: &str, list: &str) -> String {
    format!("Error - {item} in {list} was not found")
}

pub fn remove_failed(item: &str) -> String {
    format!("Error - Could not remove {item}")
}

pub fn list_removed(list: &str) -> String {
    format!("Removed: {list}")
}

pub fn list_not_found(list: &str) -> String {
    format!("Error - {list} was not found")
}

pub fn remove_list_failed(list: &str) -> String {
    format!("Error - Could not remove {list}")
}

pub fn picked(item: &str, list: &str) -> String {
    format!("Item chosen from {list}: {item}")
}

pub fn pick_failed(list: &str) -> String {
    format!("Error - Could not pick from {list}")
}

pub fn no_items(list: &str) -> String {
    format!("No items in {list}")
}

pub fn list_items(list: &str, items: &[String]) -> String {
    let mut out = format!("{list}:");
    for item in items {
        out.push_str("\n\t");
        out.push_str(item);
    }
    out
}

pub fn get_list_failed(list: &str) -> String {
    format!("Error - Could not get {list}")
}

pub const NO_LISTS: &str = "No Lists";
pub const GET_LISTS_FAILED: &str = "Error - Could not get lists";

pub fn list_names(names: &[String]) -> String {
    let mut out = String::from("Lists:");
    for name in names {
        out.push_str("\n\t");
        out.push_str(name);
    }
    out
}
