#[cfg(test)]
mod tests {
    use clap::Parser;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rust_picks_cli::cli_args::Args;
    use rust_picks_cli::line_editing::{EditAction, EditorState, PlainLines};
    use rust_picks_core::completion::Completer;
    use rust_picks_core::error::Error;
    use rust_picks_core::menu::Menu;
    use std::io::{Cursor, Read, Write};
    use std::process::{Command, Output, Stdio};

    const GREETINGS: [&str; 4] = ["hello there", "hello joe", "hey you", "goodbye hector"];

    fn menu_from_args(argv: &[&str]) -> Menu {
        let args = Args::parse_from(argv);
        let config = args.menu_config(None).unwrap();
        let items = args.items(None).unwrap();
        Menu::new(&items, config).unwrap()
    }

    fn run_rp(args: &[&str], stdin: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_rp"))
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    fn press(state: &mut EditorState, completer: &Completer<'_>, text: &str) -> EditAction {
        let mut action = EditAction::Ignore;
        for c in text.chars() {
            let code = if c == '\t' {
                KeyCode::Tab
            } else {
                KeyCode::Char(c)
            };
            action = state.handle_key(KeyEvent::new(code, KeyModifiers::NONE), completer);
        }
        action
    }

    #[test]
    fn test_piped_responses() {
        let menu = menu_from_args(&["rp", "yes", "no", "maybe", "-i", "-d", "2"]);
        let mut source = PlainLines::new(Cursor::new("m\n"));
        let mut output: Vec<u8> = Vec::new();

        assert_eq!(menu.prompt(&mut source, &mut output).unwrap(), "maybe");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Options:\n  [0] yes\n  [1] no\n  [2] maybe\nEnter an option to continue [maybe]: "
        );
    }

    #[test]
    fn test_piped_responses_retry_until_resolved() {
        let menu = menu_from_args(&["rp", "-P", "> ", "hello there", "hello joe"]);
        let mut source = PlainLines::new(Cursor::new("\nhello\nhello j\n"));
        let mut output: Vec<u8> = Vec::new();

        assert_eq!(menu.prompt(&mut source, &mut output).unwrap(), "hello joe");
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("[!] an empty response is not valid.\n"));
        assert!(transcript.contains("[!] \"hello\" matches multiple choices:\n"));
        assert_eq!(transcript.matches("> ").count(), 3);
    }

    #[test]
    fn test_piped_input_ending_early() {
        let menu = menu_from_args(&["rp", "foo", "fab"]);
        let mut source = PlainLines::new(Cursor::new("f\n"));
        let mut output: Vec<u8> = Vec::new();

        assert!(matches!(
            menu.prompt(&mut source, &mut output),
            Err(Error::EndOfInput)
        ));
    }

    #[test]
    fn test_default_index_errors_from_args() {
        let args = Args::parse_from(["rp", "yes", "no", "-d", "2"]);
        let config = args.menu_config(None).unwrap();
        let error = Menu::new(&args.options, config).unwrap_err();
        assert_eq!(
            error.to_string(),
            "The default index (2) >= length of the list (2)"
        );
    }

    #[test]
    fn test_tab_completion_of_whole_items() {
        let mut argv = vec!["rp"];
        argv.extend(GREETINGS);
        let menu = menu_from_args(&argv);
        let completer = menu.completer();
        let mut state = EditorState::new();

        press(&mut state, &completer, "h\t");
        assert_eq!(state.buffer(), "he");

        press(&mut state, &completer, "l\t");
        assert_eq!(state.buffer(), "hello ");

        press(&mut state, &completer, "j\t");
        assert_eq!(state.buffer(), "hello joe");
    }

    #[test]
    fn test_second_tab_lists_options() {
        let menu = menu_from_args(&["rp", "barbell", "barstool", "foo bar"]);
        let completer = menu.completer();
        let mut state = EditorState::new();

        assert_eq!(press(&mut state, &completer, "bar\t"), EditAction::Bell);
        assert_eq!(
            press(&mut state, &completer, "\t"),
            EditAction::List(
                "[!] \"bar\" matches multiple options:\n[!]   barbell\n[!]   barstool\n"
                    .to_string()
            )
        );
        assert_eq!(state.buffer(), "bar");
    }

    #[test]
    fn test_fuzzy_tab_completion_of_words() {
        let mut argv = vec!["rp", "--fuzzy"];
        argv.extend(GREETINGS);
        let menu = menu_from_args(&argv);
        let completer = menu.completer();
        let mut state = EditorState::new();

        press(&mut state, &completer, "he g\t");
        assert_eq!(state.buffer(), "he goodbye ");

        assert_eq!(press(&mut state, &completer, "\t"), EditAction::Bell);
        assert_eq!(state.buffer(), "he goodbye ");

        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &completer),
            EditAction::Submit("he goodbye ".to_string())
        );
    }

    #[test]
    fn test_insensitive_tab_completion() {
        let menu = menu_from_args(&["rp", "-I", "HELLO you", "hello joe", "hey you"]);
        let completer = menu.completer();
        let mut state = EditorState::new();

        press(&mut state, &completer, "H\t");
        assert_eq!(state.buffer(), "he");
    }

    #[test]
    fn test_binary_prints_selection_on_stdout() {
        let output = run_rp(&["yes", "no"], "n\n");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "no\n");
        assert_eq!(
            String::from_utf8(output.stderr).unwrap(),
            "Options:\n  yes\n  no\nEnter an option to continue: "
        );
    }

    #[test]
    fn test_binary_swaps_streams_with_stdout_flag() {
        let output = run_rp(&["--stdout", "yes", "no"], "y\n");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8(output.stderr).unwrap(), "yes\n");
        assert!(String::from_utf8(output.stdout)
            .unwrap()
            .starts_with("Options:\n"));
    }

    #[test]
    fn test_binary_reports_empty_piped_items() {
        let output = run_rp(&[], "\n  \n");

        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            String::from_utf8(output.stderr).unwrap(),
            "ERROR: The item list is empty.\n"
        );
    }

    #[test]
    fn test_binary_reports_bad_default_index() {
        let output = run_rp(&["yes", "no", "-d", "two"], "");

        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            String::from_utf8(output.stderr).unwrap(),
            "ERROR: The default index (two) is not an integer\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_binary_interrupted_while_reading_piped_responses() {
        let mut child = Command::new(env!("CARGO_BIN_EXE_rp"))
            .args(["yes", "no"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let mut stderr = child.stderr.take().unwrap();

        // Wait for the prompt so the response read is pending
        let mut transcript = Vec::new();
        let mut chunk = [0u8; 256];
        while !transcript.ends_with(b"continue: ") {
            let read = stderr.read(&mut chunk).unwrap();
            assert!(read > 0, "rp exited before prompting");
            transcript.extend_from_slice(&chunk[..read]);
        }

        let killed = Command::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()
            .unwrap();
        assert!(killed.success());

        let status = child.wait().unwrap();
        stderr.read_to_end(&mut transcript).unwrap();
        assert_eq!(status.code(), Some(130));
        assert!(String::from_utf8(transcript)
            .unwrap()
            .ends_with("CTRL-C detected. Exiting.\n"));
    }
}
