use std::io::{self, Write};

use jester_core::{AppViewModel, ItemId};

const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &ItemId) -> String {
    id.to_string()[..SHORT_ID_LEN].to_string()
}

pub fn render_loading(out: &mut impl Write, count: usize) -> io::Result<()> {
    writeln!(out, "Loading {count} new jokes...")
}

/// Writes the joke list, best-voted first, followed by a short summary line.
pub fn render(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    if view.jokes.is_empty() {
        writeln!(out, "No jokes yet. Run `jester fetch` to get some.")?;
        return Ok(());
    }

    let width = view
        .jokes
        .iter()
        .map(|joke| format!("{:+}", joke.votes).len())
        .max()
        .unwrap_or(2);
    for joke in &view.jokes {
        writeln!(
            out,
            "{:>width$}  {}  {}",
            format!("{:+}", joke.votes),
            short_id(&joke.id),
            joke.text.trim(),
        )?;
    }
    if let Some(added) = view.last_added {
        writeln!(out, "\n{added} new jokes, {} in total.", view.jokes.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jester_core::JokeRowView;
    use pretty_assertions::assert_eq;

    fn row(id: &str, text: &str, votes: i64) -> JokeRowView {
        JokeRowView {
            id: ItemId::parse_str(id).unwrap(),
            text: text.to_string(),
            votes,
        }
    }

    fn rendered(view: &AppViewModel) -> String {
        let mut out = Vec::new();
        render(&mut out, view).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_collection_hints_at_fetch() {
        let text = rendered(&AppViewModel::default());
        assert!(text.contains("jester fetch"));
    }

    #[test]
    fn rows_show_signed_votes_and_short_ids() {
        let view = AppViewModel {
            jokes: vec![
                row("0f8fad5b-d9cb-469f-a165-70867728950e", "Top joke", 12),
                row("7c9e6679-7425-40de-944b-e07fc1f90ae7", "Meh joke\n", -3),
            ],
            last_added: Some(2),
            ..AppViewModel::default()
        };

        assert_eq!(
            rendered(&view),
            "+12  0f8fad5b  Top joke\n -3  7c9e6679  Meh joke\n\n2 new jokes, 2 in total.\n"
        );
    }
}
