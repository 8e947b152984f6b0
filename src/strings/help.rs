//! # Help Text
//!
//! Detailed help messages and usage lines for the list commands.
//! Rendered with the configured prefix, since it can differ from `~`.

pub fn main(p: char) -> String {
    format!(
        "Commands:
    {p}add <list> <item(s)>
    {p}remove <list> <item(s)>
    {p}removeList <list>
    {p}pick <list> [remove]
    {p}list <list>
    {p}lists

Usage:
    Add Command:
        {p}add <list> <item(s)>
        Places new items at the end of a list.
        Example Usage: {p}add prompts villain hero
        If the list does not exist, it will be created.
        Multiple items can be added by appending them to the
        end of the command, separated by a space.

    Remove Command:
        {p}remove <list> <item(s)>
        Removes every occurrence of an item from a list.
        Example Usage: {p}remove prompts hero
        To remove multiple items, append them to the end of the
        command separated by spaces.

    Remove List Command:
        {p}removeList <list>
        Removes an entire list.
        Example Usage: {p}removeList prompts

    Pick Command:
        {p}pick <list> [remove]
        Randomly chooses an item from a list.
        Example Usage: {p}pick prompts
        To remove the chosen item from the list, append any
        word after the list name.
        Example Usage: {p}pick prompts true

    List Command:
        {p}list <list>
        Displays all of the items in a list.
        Example Usage: {p}list prompts

    Lists Command:
        {p}lists
        Displays all of the lists stored for this room.
        Example Usage: {p}lists"
    )
}

fn usage_error(title: &str, usage: String) -> String {
    format!("{title} Command Error - Incorrect number of arguments\n\nUsage: {usage}")
}

pub fn add_usage(p: char) -> String {
    usage_error("Add", format!("{p}add <list> <item> [items]"))
}

pub fn remove_usage(p: char) -> String {
    usage_error("Remove", format!("{p}remove <list> <item> [items]"))
}

pub fn remove_list_usage(p: char) -> String {
    usage_error("Remove List", format!("{p}removeList <list>"))
}

pub fn pick_usage(p: char) -> String {
    usage_error("Pick", format!("{p}pick <list> [remove]"))
}

pub fn list_usage(p: char) -> String {
    usage_error("List", format!("{p}list <list>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_uses_prefix() {
        let text = main('!');
        assert!(text.contains("!add <list> <item(s)>"));
        assert!(text.contains("!lists"));
        assert!(!text.contains('~'));
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(
            pick_usage('~'),
            "Pick Command Error - Incorrect number of arguments\n\nUsage: ~pick <list> [remove]"
        );
    }
}
