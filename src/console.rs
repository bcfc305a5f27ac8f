use std::sync::Arc;

use engine::agent::Agent;
use engine::rules::Action;
use engine::state::StateView;
use futures_lite::future::Boxed;
use tokio::sync::{mpsc, Mutex};

/// Human-driven seat. A dedicated thread pumps stdin lines into a
/// channel; on each turn the first line that parses as a JSON `Action`
/// is played. Taking too long forfeits the turn upstream.
pub struct ConsoleAgent {
    lines: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl ConsoleAgent {
    pub fn spawn() -> Self {
        let (line_tx, line_rx) = mpsc::channel(1);
        std::thread::spawn(move || input_loop(line_tx));
        Self {
            lines: Arc::new(Mutex::new(line_rx)),
        }
    }
}

impl Agent for ConsoleAgent {
    fn propose_action(&mut self, view: StateView) -> Boxed<Action> {
        let lines = Arc::clone(&self.lines);
        Box::pin(async move {
            println!(
                "> your turn ({} of round {}); enter an action as JSON",
                view.players[view.seat].name, view.rounds_played
            );
            println!(r#">   e.g. {{"take_gems":["Diamond","Sapphire","Emerald"]}} or {{"purchase":1}}"#);
            let mut lines = lines.lock().await;
            loop {
                // a closed stdin behaves like a silent player
                let Some(line) = lines.recv().await else {
                    return Action::Skip;
                };
                match serde_json::from_str::<Action>(line.trim()) {
                    Ok(action) => return action,
                    Err(decoding_error) => {
                        println!("> malformatted action: {decoding_error}");
                    }
                }
            }
        })
    }
}

fn input_loop(line_tx: mpsc::Sender<String>) {
    let stdin = std::io::stdin();
    let mut buffer = String::new();
    loop {
        buffer.clear();
        match stdin.read_line(&mut buffer) {
            Ok(0) | Err(_) => return,
            Ok(_) => {
                if line_tx.blocking_send(buffer.clone()).is_err() {
                    return;
                }
            }
        }
    }
}
