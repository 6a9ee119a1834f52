use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::warn;

use ww_engine::resolver::exact_match;
use ww_engine::{Session, WorldState};

/// Drive `session` from line-based input until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> Result<(), String> {
    writeln!(out, "  {} Whisperwood", "Entering".bold()).map_err(|e| e.to_string())?;
    writeln!(
        out,
        "  Pick a number, type a choice, or describe what you do. 'state' shows the world, 'quit' exits.\n"
    )
    .map_err(|e| e.to_string())?;

    let mut view = View::default();
    session.start();
    view.render(session.state(), out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ").map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        // An offered choice wins over a command of the same name.
        let offered = exact_match(text, &session.state().available_choices).is_some();
        if !offered && (text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("q")) {
            break;
        }
        if !offered && text.eq_ignore_ascii_case("state") {
            let json = serde_json::to_string_pretty(session.state()).map_err(|e| e.to_string())?;
            writeln!(out, "{json}\n").map_err(|e| e.to_string())?;
            continue;
        }

        let submitted = pick(text, &session.state().available_choices);
        if let Err(e) = session.submit(&submitted) {
            warn!(error = %e, "discarding corrupted state");
            writeln!(out, "{}\n", format!("{e}. Starting over.").yellow())
                .map_err(|e| e.to_string())?;
            session.restart();
        }
        view.render(session.state(), out)?;
    }

    Ok(())
}

/// Map a 1-based choice number to its text; anything else passes through.
fn pick(text: &str, choices: &[String]) -> String {
    match text.parse::<usize>() {
        Ok(n) if (1..=choices.len()).contains(&n) => choices[n - 1].clone(),
        _ => text.to_string(),
    }
}

/// Tracks how much of the story has already been printed.
#[derive(Default)]
struct View {
    session: Option<String>,
    shown: usize,
}

impl View {
    fn render<W: Write>(&mut self, state: &WorldState, out: &mut W) -> Result<(), String> {
        let session = state.session_id.to_string();
        if self.session.as_deref() != Some(session.as_str()) {
            if self.session.is_some() {
                writeln!(out, "  {}\n", "A new adventure begins.".bold())
                    .map_err(|e| e.to_string())?;
            }
            self.session = Some(session);
            self.shown = 0;
        }

        for segment in state.story.iter().skip(self.shown) {
            writeln!(out, "{segment}\n").map_err(|e| e.to_string())?;
        }
        self.shown = state.story.len();

        writeln!(out, "{}", status_line(state).dimmed()).map_err(|e| e.to_string())?;
        for (i, choice) in state.available_choices.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, choice.cyan()).map_err(|e| e.to_string())?;
        }
        writeln!(out).map_err(|e| e.to_string())
    }
}

fn status_line(state: &WorldState) -> String {
    let inventory = if state.player.inventory.is_empty() {
        "empty".to_string()
    } else {
        state.player.inventory.join(", ")
    };
    format!(
        "Health: {} | Location: {} | Inventory: {}",
        state.player.health, state.player.location_name, inventory
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ww_engine::{EngineConfig, Story, TurnEngine};
    use ww_narrator::ScriptedNarrator;

    fn session(health: i32) -> Session {
        let config = EngineConfig::default().with_start_health(health);
        Session::new(TurnEngine::new(
            Box::new(ScriptedNarrator::new()),
            Story::builtin(),
            config,
        ))
    }

    fn play(session: &mut Session, input: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn number_picks_choice() {
        let choices = vec!["Go left".to_string(), "Go right".to_string()];
        assert_eq!(pick("2", &choices), "Go right");
        assert_eq!(pick("3", &choices), "3");
        assert_eq!(pick("0", &choices), "0");
        assert_eq!(pick("head left", &choices), "head left");
    }

    #[test]
    fn opening_scene_and_choices() {
        let mut s = session(100);
        let out = play(&mut s, "");
        assert!(out.contains("Health: 100 | Location: Mysterious Whispering Forest"));
        assert!(out.contains("  1. Go deeper into the forest"));
        assert!(out.contains("  3. Examine the strange glowing mushroom"));
    }

    #[test]
    fn choosing_by_number_moves_player() {
        let mut s = session(100);
        let out = play(&mut s, "1\nquit\n");
        assert!(out.contains("Location: Dense Tangled Woods"));
        assert!(out.contains("Health: 90"));
        assert_eq!(s.state().player.location_id, "deep_forest");
    }

    #[test]
    fn invalid_text_reoffers_choices() {
        let mut s = session(100);
        let out = play(&mut s, "summon a dragon\n");
        assert!(out.contains("That action isn't possible here."));
        assert_eq!(s.state().player.health, 100);
    }

    #[test]
    fn game_over_then_restart() {
        let mut s = session(5);
        let out = play(&mut s, "1\n");
        assert!(out.contains("The adventure ends here."));
        assert!(out.contains("  1. Restart Game"));
        assert!(s.state().game_over);

        let out = play(&mut s, "1\n");
        assert!(out.contains("A new adventure begins.") || out.contains("Health: 5 |"));
        assert!(!s.state().game_over);
    }

    #[test]
    fn story_choice_named_like_a_command() {
        let story = Story::from_json(
            r#"{
              "start_location": "dock",
              "locations": [
                { "id": "dock", "name": "Old Dock", "choices": [
                  { "text": "Quit", "next": "shore", "narrative": "You give up on the boat." },
                  { "text": "State your name" }
                ] },
                { "id": "shore", "name": "Pebble Shore" }
              ]
            }"#,
        )
        .unwrap();
        let mut s = Session::new(TurnEngine::new(
            Box::new(ScriptedNarrator::new()),
            story,
            EngineConfig::default(),
        ));

        let out = play(&mut s, "quit\nq\n");
        assert!(out.contains("You give up on the boat."));
        assert_eq!(s.state().player.location_id, "shore");
    }

    #[test]
    fn state_command_prints_json() {
        let mut s = session(100);
        let out = play(&mut s, "state\n");
        assert!(out.contains("\"location_id\": \"start_forest\""));
    }
}
