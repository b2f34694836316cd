use kanal::{AsyncReceiver, AsyncSender};
use shobdo_types::{AppEvent, Language, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
commands:
  lang bn|ko       choose the input language
  type <text>      replace the search box text
  space            complete from the top suggestion
  pick N           use suggestion N
  search           look up the search box text
  clear            empty the search box
  paste            paste from the clipboard
  fav N            star or unstar result N
  copy N           copy result N
  share N          share result N
  speak N          read result N aloud (again to stop)
  favs             list favorites
  unfav N          remove favorite N
  library          reload the library
  more             load the next library page
  find <text>      filter the library
  libfav N         star or unstar library row N
  quit             exit";

/// Terminal front-end: stdin lines in, rendered app events out
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("UI loop cancelled");
                return Ok(());
            }
            event = app_to_ui_rx.recv() => {
                if let Some(text) = render(&event?) {
                    println!("{text}");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                    return Ok(());
                };

                if line.trim() == "help" {
                    println!("{HELP}");
                    continue;
                }

                match parse_command(&line) {
                    Some(UiEvent::Close) => {
                        ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                        return Ok(());
                    }
                    Some(event) => ui_to_app_tx.send(AppEvent::UiEvent(event)).await?,
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command, try 'help'"),
                }
            }
        }
    }
}

/// Parse one terminal line. Row numbers are 1-based on screen.
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let row = || rest.parse::<usize>().ok()?.checked_sub(1);

    let event = match command {
        "lang" => UiEvent::SelectLanguage(Language::from_code(rest)?),
        "type" => UiEvent::TextInput(rest.to_string()),
        "space" => UiEvent::CommitKey,
        "pick" => UiEvent::SelectSuggestion(row()?),
        "search" => UiEvent::Search,
        "clear" => UiEvent::ClearInput,
        "paste" => UiEvent::PasteFromClipboard,
        "fav" => UiEvent::ToggleFavorite(row()?),
        "copy" => UiEvent::CopyResult(row()?),
        "share" => UiEvent::ShareResult(row()?),
        "speak" => UiEvent::SpeakResult(row()?),
        "favs" => UiEvent::ShowFavorites,
        "unfav" => UiEvent::RemoveFavorite(row()?),
        "library" => UiEvent::RefreshLibrary,
        "more" => UiEvent::LoadMoreLibrary,
        "find" => UiEvent::SearchLibrary(rest.to_string()),
        "libfav" => UiEvent::ToggleLibraryFavorite(row()?),
        "quit" | "exit" => UiEvent::Close,
        _ => return None,
    };

    Some(event)
}

fn render(event: &AppEvent) -> Option<String> {
    let text = match event {
        AppEvent::BackendReady => "ready, type 'help' for commands".to_string(),
        AppEvent::ShowInput(input) => format!("> {input}"),
        AppEvent::ShowSuggestions(suggestions) => {
            if suggestions.is_empty() {
                return None;
            }
            let items: Vec<String> = suggestions
                .iter()
                .enumerate()
                .map(|(i, s)| format!("[{}] {}", i + 1, s.text))
                .collect();
            items.join("  ")
        }
        AppEvent::ShowResults(results) => {
            if results.is_empty() {
                return Some("(no results)".to_string());
            }
            results
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{:>3}. {}  |  {}", i + 1, r.bangla, r.korean))
                .collect::<Vec<_>>()
                .join("\n")
        }
        AppEvent::ShowLibrary(entries) => {
            let mut out = format!("library ({} words)", entries.len());
            for (i, entry) in entries.iter().enumerate() {
                out.push_str(&format!("\n{:>4}. {}  |  {}", i + 1, entry.bangla, entry.korean));
            }
            out
        }
        AppEvent::ShowFavorites(buckets) => {
            if buckets.is_empty() {
                return Some("(no favorites)".to_string());
            }
            let mut out = String::new();
            let mut row = 0;
            for bucket in buckets {
                out.push_str(&format!("== {} ==\n", bucket.label));
                for favorite in &bucket.entries {
                    row += 1;
                    out.push_str(&format!(
                        "{:>3}. {}  |  {}\n",
                        row,
                        favorite.bangla(),
                        favorite.korean()
                    ));
                }
            }
            out.trim_end().to_string()
        }
        AppEvent::Notice { title, message } => format!("[{title}] {message}"),
        AppEvent::UiEvent(_) => return None,
    };

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shobdo_types::{FavoriteBucket, FavoriteEntry, VocabularyEntry};

    #[test]
    fn test_parse_row_commands_are_one_based() {
        assert!(matches!(parse_command("pick 1"), Some(UiEvent::SelectSuggestion(0))));
        assert!(matches!(parse_command("  fav 3 "), Some(UiEvent::ToggleFavorite(2))));
        assert!(matches!(parse_command("libfav 2"), Some(UiEvent::ToggleLibraryFavorite(1))));
        assert!(parse_command("pick 0").is_none());
        assert!(parse_command("copy x").is_none());
    }

    #[test]
    fn test_parse_text_commands_keep_inner_spaces() {
        match parse_command("type ভালো আছি") {
            Some(UiEvent::TextInput(text)) => assert_eq!(text, "ভালো আছি"),
            other => panic!("unexpected {:?}", other),
        }
        match parse_command("find") {
            Some(UiEvent::SearchLibrary(text)) => assert!(text.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_language() {
        assert!(matches!(
            parse_command("lang ko"),
            Some(UiEvent::SelectLanguage(Language::Korean))
        ));
        assert!(parse_command("lang jp").is_none());
        assert!(matches!(parse_command("exit"), Some(UiEvent::Close)));
        assert!(parse_command("dance").is_none());
    }

    #[test]
    fn test_render_favorites_numbers_across_buckets() {
        let bucket = |label: &str, pairs: &[(&str, &str)]| FavoriteBucket {
            label: label.to_string(),
            entries: pairs
                .iter()
                .map(|(b, k)| FavoriteEntry {
                    entry: VocabularyEntry::new("", *b, *k),
                    timestamp: 0,
                })
                .collect(),
        };

        let text = render(&AppEvent::ShowFavorites(vec![
            bucket("Today", &[("পানি", "물")]),
            bucket("Yesterday", &[("বই", "책")]),
        ]))
        .unwrap();

        assert!(text.contains("== Today ==\n  1. পানি  |  물"));
        assert!(text.contains("== Yesterday ==\n  2. বই  |  책"));
    }

    #[test]
    fn test_render_skips_empty_suggestions() {
        assert!(render(&AppEvent::ShowSuggestions(Vec::new())).is_none());
    }
}
