use std::collections::BTreeSet;

use fider_core::Msg;

pub const HELP: &str = "\
commands:
  search <text>    type into the search box (empty text clears it)
  clear            click the search box cancel icon
  view <name>      pick a view, e.g. trending, recent, most-wanted
  tag <id>         toggle one tag in the tags filter
  tags <a,b,...>   set the whole tag selection
  more             view more posts
  go <location>    navigate, e.g. go /admin/tags or go /?view=recent
  where            print the current location
  help             show this text
  quit             leave";

#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    Page(Msg),
    Navigate(String),
    Where,
    Help,
    Quit,
}

/// Parses one input line. Returns `None` for unknown commands.
pub fn parse_line(line: &str) -> Option<InputCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (command, arg) = line
        .trim_start()
        .split_once(' ')
        .unwrap_or((line.trim(), ""));

    let parsed = match command {
        "search" => InputCommand::Page(Msg::QueryChanged(arg.to_string())),
        "clear" => InputCommand::Page(Msg::SearchCleared),
        "view" => InputCommand::Page(Msg::ViewChanged(arg.trim().to_string())),
        "tag" if !arg.trim().is_empty() => InputCommand::Page(Msg::TagToggled(arg.trim().to_string())),
        "tags" => InputCommand::Page(Msg::TagsChanged(parse_tags(arg))),
        "more" => InputCommand::Page(Msg::ShowMoreClicked),
        "go" if !arg.trim().is_empty() => InputCommand::Navigate(arg.trim().to_string()),
        "where" => InputCommand::Where,
        "help" => InputCommand::Help,
        "quit" | "exit" => InputCommand::Quit,
        _ => return None,
    };
    Some(parsed)
}

fn parse_tags(arg: &str) -> BTreeSet<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
