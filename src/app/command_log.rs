//! Kommando-Log: Commands als XML serialisieren und fuer Replay parsen.
//!
//! Jeder Eintrag traegt Art, Beschreibung und beide Kurven-Set-Bloecke im
//! selben Schema wie das Dokument. Ein gespeichertes Log laesst sich gegen
//! ein frisches Dokument abspielen und stellt den exakten Endzustand
//! wieder her — unabhaengig von einer lebenden visuellen Ebene.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{Command, CommandKind};
use crate::core::{Curve, CurveSet};
use crate::xml::parser::{assemble_curve_set, read_curve, required_attr};
use crate::xml::writer::{escape_xml, write_curve_set_curves};

/// Schreibt eine Command-Folge als XML-String.
pub fn write_command_log(commands: &[Command]) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str("<commandLog version=\"1\">\n");

    for command in commands {
        output.push_str(&format!(
            "    <command kind=\"{}\" description=\"{}\">\n",
            command.kind().as_str(),
            escape_xml(command.description())
        ));
        output.push_str("        <before>\n");
        write_curve_set_curves(&mut output, command.before(), 3);
        output.push_str("        </before>\n");
        output.push_str("        <after>\n");
        write_curve_set_curves(&mut output, command.after(), 3);
        output.push_str("        </after>\n");
        output.push_str("    </command>\n");
    }

    output.push_str("</commandLog>\n");
    output
}

/// Parsed ein Kommando-Log aus einem XML-String.
pub fn parse_command_log(xml: &str) -> Result<Vec<Command>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut commands: Vec<Command> = Vec::new();
    let mut saw_log = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "commandLog" => saw_log = true,
                    "command" => {
                        let kind_text = required_attr(e, "kind")
                            .context("Kommandodaten koennen nicht gelesen werden")?;
                        let kind = CommandKind::parse(&kind_text)
                            .ok_or_else(|| anyhow!("Unbekannte Command-Art '{kind_text}'"))?;
                        let description = required_attr(e, "description")
                            .context("Kommandodaten koennen nicht gelesen werden")?;
                        let command = read_command(&mut reader, kind, description)?;
                        commands.push(command);
                    }
                    other => bail!("Unerwartetes Element '<{other}>' im Kommando-Log"),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                bail!("Unerwartetes Element '<{tag}>' im Kommando-Log");
            }
            Ok(Event::End(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_log {
        bail!("Kein <commandLog>-Element gefunden");
    }

    Ok(commands)
}

/// Liest einen Command ab dem bereits konsumierten `<command>`-Start-Tag.
fn read_command(
    reader: &mut Reader<&[u8]>,
    kind: CommandKind,
    description: String,
) -> Result<Command> {
    let mut before: Option<CurveSet> = None;
    let mut after: Option<CurveSet> = None;
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "before" => before = Some(read_curve_set_block(reader, "before")?),
                    "after" => after = Some(read_curve_set_block(reader, "after")?),
                    other => bail!(
                        "Kommandodaten koennen nicht gelesen werden (unerwartetes Element '<{other}>')"
                    ),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    // Selbstschliessender Block = leeres Set; scheitert beim
                    // Zusammenbau an der fehlenden Achsenkurve
                    "before" => before = Some(assemble_curve_set(Vec::new())?),
                    "after" => after = Some(assemble_curve_set(Vec::new())?),
                    other => bail!(
                        "Kommandodaten koennen nicht gelesen werden (unerwartetes Element '<{other}>')"
                    ),
                }
            }
            Ok(Event::End(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                if tag == "command" {
                    break;
                }
            }
            Ok(Event::Eof) => {
                bail!("Kommandodaten koennen nicht gelesen werden (Dokumentende im Command)")
            }
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let before =
        before.ok_or_else(|| anyhow!("Command '{description}': <before>-Block fehlt"))?;
    let after = after.ok_or_else(|| anyhow!("Command '{description}': <after>-Block fehlt"))?;
    Ok(Command::new(kind, description, before, after))
}

/// Liest Kurven bis zum schliessenden `end_tag` und baut daraus ein Set.
fn read_curve_set_block(reader: &mut Reader<&[u8]>, end_tag: &str) -> Result<CurveSet> {
    let mut curves: Vec<Curve> = Vec::new();
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                if tag == "curve" {
                    let name = required_attr(e, "name")
                        .context("Kurvendaten koennen nicht gelesen werden")?;
                    curves.push(read_curve(reader, name)?);
                } else {
                    bail!(
                        "Kommandodaten koennen nicht gelesen werden (unerwartetes Element '<{tag}>')"
                    );
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                bail!(
                    "Kommandodaten koennen nicht gelesen werden (unerwartetes Element '<{tag}>')"
                );
            }
            Ok(Event::End(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                if tag == end_tag {
                    break;
                }
            }
            Ok(Event::Eof) => {
                bail!("Kommandodaten koennen nicht gelesen werden (Dokumentende im <{end_tag}>-Block)")
            }
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    assemble_curve_set(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn sample_command() -> Command {
        let before = CurveSet::new();
        let mut after = before.clone();
        after
            .axis_curve_mut()
            .create_point(DVec2::new(10.0, 20.0), DVec2::new(1.0, 2.0));
        Command::new(
            CommandKind::AddPoints,
            "Achsenpunkt hinzufuegen",
            before,
            after,
        )
    }

    #[test]
    fn test_command_log_roundtrip() {
        let commands = vec![sample_command()];
        let xml = write_command_log(&commands);
        let parsed = parse_command_log(&xml).expect("Parsing fehlgeschlagen");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind(), CommandKind::AddPoints);
        assert_eq!(parsed[0].description(), "Achsenpunkt hinzufuegen");
        assert_eq!(parsed[0].before(), commands[0].before());
        assert_eq!(parsed[0].after(), commands[0].after());
    }

    #[test]
    fn test_missing_after_block_aborts() {
        let xml = r#"
        <commandLog version="1">
            <command kind="addPoints" description="kaputt">
                <before>
                    <curve name="Achsen"><points></points></curve>
                </before>
            </command>
        </commandLog>
        "#;

        let err = parse_command_log(xml).expect_err("Parser sollte fehlschlagen");
        assert!(format!("{err:#}").contains("<after>-Block fehlt"));
    }

    #[test]
    fn test_unknown_kind_aborts() {
        let xml = r#"
        <commandLog version="1">
            <command kind="teleportPoints" description="kaputt">
                <before></before>
                <after></after>
            </command>
        </commandLog>
        "#;

        let err = parse_command_log(xml).expect_err("Parser sollte fehlschlagen");
        assert!(format!("{err:#}").contains("Unbekannte Command-Art"));
    }
}
