//! Diagnose-Replay fuer Kommando-Logs.
//!
//! Spielt ein aufgezeichnetes Kommando-Log gegen ein Dokument ab und
//! schreibt das Ergebnis-Dokument nach stdout. Laeuft ohne visuelle
//! Ebene des Hosts; der Szenen-Abgleich des Kerns laeuft trotzdem mit und
//! validiert so die aufgezeichnete Session.

use anyhow::{bail, Context, Result};
use graph_digitizer::DigitizerSession;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(document_path), Some(log_path)) = (args.next(), args.next()) else {
        bail!("Aufruf: graph-digitizer-replay <dokument.xml> <kommando-log.xml>");
    };

    log::info!(
        "graph-digitizer-replay v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let document_xml = std::fs::read_to_string(&document_path)
        .with_context(|| format!("'{document_path}' konnte nicht gelesen werden"))?;
    let log_xml = std::fs::read_to_string(&log_path)
        .with_context(|| format!("'{log_path}' konnte nicht gelesen werden"))?;

    let mut session = DigitizerSession::with_defaults();
    session.load_document(&document_xml)?;
    let count = session.replay_command_log(&log_xml)?;

    log::info!(
        "{} Commands abgespielt: {} Kurven, {} Punkte im Endzustand",
        count,
        session.current_curve_set().num_graph_curves(),
        session.current_curve_set().num_points()
    );

    print!("{}", session.save_document());
    Ok(())
}
