use std::io::Write;
use std::sync::Arc;

use rw_app::{WizardError, WizardOrchestrator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::console::command::{CommandError, ConsoleCommand, HELP_TEXT};
use crate::console::event_port::ConsoleEventPort;

/// Reads commands until `quit` or end of input.
///
/// Submissions run in the background so the form stays editable while the
/// record store answers; their outcome arrives through the event port. Every
/// submission task is drained before returning.
pub async fn run_console<R, W>(
    wizard: Arc<WizardOrchestrator>,
    console: Arc<ConsoleEventPort<W>>,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let mut lines = input.lines();
    let mut submissions = JoinSet::new();

    console.render_now(&wizard.snapshot().await);

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                console.print(&err.to_string());
                continue;
            }
        };
        debug!(?command, "console command");

        match command {
            ConsoleCommand::Set { field, value } => {
                report(&console, wizard.set_field(field, value).await.err());
            }
            ConsoleCommand::Toggle { slot, present } => {
                report(&console, wizard.toggle_event(slot, present).await.err());
            }
            ConsoleCommand::Next => {
                wizard.advance().await;
            }
            ConsoleCommand::Back => {
                wizard.retreat().await;
            }
            ConsoleCommand::Restart => {
                wizard.restart().await;
            }
            ConsoleCommand::Submit => {
                if !submissions.is_empty() {
                    debug!(running = submissions.len(), "earlier submission still tracked");
                }
                let wizard = Arc::clone(&wizard);
                submissions.spawn(
                    async move {
                        let snapshot = wizard.submit().await;
                        info!(submission = ?snapshot.submission, "console submission finished");
                    }
                    .instrument(info_span!("console.submit")),
                );
            }
            ConsoleCommand::Show => console.render_now(&wizard.snapshot().await),
            ConsoleCommand::Help => console.print(HELP_TEXT),
            ConsoleCommand::Quit => break,
        }
    }

    while let Some(joined) = submissions.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "submission task ended abnormally");
        }
    }
    Ok(())
}

fn report<W: Write + Send>(console: &ConsoleEventPort<W>, err: Option<WizardError>) {
    if let Some(err) = err {
        console.print(&format!("! {err}"));
    }
}
