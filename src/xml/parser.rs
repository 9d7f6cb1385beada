//! Parser fuer Dokument-XML.
//!
//! Fehlerhafte Eingaben brechen den Parse mit beschreibender Meldung ab;
//! es wird nie ein teilweise befuelltes Dokument zurueckgegeben.

use std::collections::HashSet;

use anyhow::{anyhow, bail, Context, Result};
use glam::DVec2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::{
    AxisScale, ColorFilterMode, ColorFilterSettings, ConnectMode, CoordsModel, Curve, CurveSet,
    CurveStyle, Document, Point, AXIS_CURVE_NAME,
};

/// Parsed ein Dokument aus einem XML-String.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut coords = CoordsModel::default();
    let mut curves: Vec<Curve> = Vec::new();
    let mut saw_document = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "document" => saw_document = true,
                    "coordinates" => coords = read_coordinates(e)?,
                    "curve" => {
                        let name = required_attr(e, "name")
                            .context("Kurvendaten koennen nicht gelesen werden")?;
                        let curve = read_curve(&mut reader, name)?;
                        curves.push(curve);
                    }
                    other => bail!("Unerwartetes Element '<{other}>' im Dokument"),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "coordinates" => coords = read_coordinates(e)?,
                    other => bail!("Unerwartetes Element '<{other}>' im Dokument"),
                }
            }
            Ok(Event::End(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !saw_document {
        bail!("Kein <document>-Element gefunden");
    }

    let curve_set = assemble_curve_set(curves)?;
    Ok(Document::from_parts(curve_set, coords))
}

/// Sortiert geparste Kurven in Achsenkurve und Graph-Kurven und prueft
/// die Namens-Eindeutigkeit. Auch vom Kommando-Log-Parser verwendet.
pub(crate) fn assemble_curve_set(curves: Vec<Curve>) -> Result<CurveSet> {
    let mut axis: Option<Curve> = None;
    let mut graphs: Vec<Curve> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for curve in curves {
        if !seen.insert(curve.name().to_string()) {
            bail!("Doppelter Kurvenname '{}'", curve.name());
        }
        if curve.name() == AXIS_CURVE_NAME {
            axis = Some(curve);
        } else {
            graphs.push(curve);
        }
    }

    let axis = axis.ok_or_else(|| anyhow!("Achsenkurve '{AXIS_CURVE_NAME}' fehlt"))?;
    Ok(CurveSet::from_parts(axis, graphs))
}

/// Liest eine Kurve ab dem bereits konsumierten `<curve>`-Start-Tag.
pub(crate) fn read_curve(reader: &mut Reader<&[u8]>, name: String) -> Result<Curve> {
    let mut buffer = Vec::new();
    let mut filter = ColorFilterSettings::default_filter();
    let mut style = if name == AXIS_CURVE_NAME {
        CurveStyle::default_axis_curve()
    } else {
        CurveStyle::default_graph_curve()
    };
    let mut points: Vec<Point> = Vec::new();
    let mut in_points = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "colorFilter" => {
                        filter = read_color_filter(e).with_context(|| {
                            format!("Kurvendaten koennen nicht gelesen werden (Kurve '{name}')")
                        })?;
                    }
                    "curveStyle" => {
                        style = read_curve_style(e).with_context(|| {
                            format!("Kurvendaten koennen nicht gelesen werden (Kurve '{name}')")
                        })?;
                    }
                    "points" => in_points = true,
                    "point" if in_points => {
                        points.push(
                            read_point(e).context("Punktdaten koennen nicht gelesen werden")?,
                        );
                    }
                    other => bail!(
                        "Kurvendaten koennen nicht gelesen werden (unerwartetes Element '<{other}>' in Kurve '{name}')"
                    ),
                }
            }
            Ok(Event::End(ref e)) => {
                let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
                match tag.as_str() {
                    "points" => in_points = false,
                    "curve" => break,
                    _ => {}
                }
            }
            Ok(Event::Eof) => {
                bail!("Kurvendaten koennen nicht gelesen werden (Dokumentende in Kurve '{name}')")
            }
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    Ok(Curve::from_parts(name, filter, style, points))
}

fn read_coordinates(e: &BytesStart) -> Result<CoordsModel> {
    let scale_x = required_attr(e, "scaleX")
        .context("Koordinaten koennen nicht gelesen werden")?;
    let scale_y = required_attr(e, "scaleY")
        .context("Koordinaten koennen nicht gelesen werden")?;

    Ok(CoordsModel {
        scale_x: AxisScale::parse(&scale_x)
            .ok_or_else(|| anyhow!("Unbekannte Achsen-Skalierung '{scale_x}'"))?,
        scale_y: AxisScale::parse(&scale_y)
            .ok_or_else(|| anyhow!("Unbekannte Achsen-Skalierung '{scale_y}'"))?,
    })
}

fn read_color_filter(e: &BytesStart) -> Result<ColorFilterSettings> {
    let mode = required_attr(e, "mode")?;
    Ok(ColorFilterSettings {
        mode: ColorFilterMode::parse(&mode)
            .ok_or_else(|| anyhow!("Unbekannter Filter-Modus '{mode}'"))?,
        low: parse_number(&required_attr(e, "low")?, "low")?,
        high: parse_number(&required_attr(e, "high")?, "high")?,
    })
}

fn read_curve_style(e: &BytesStart) -> Result<CurveStyle> {
    let connect = required_attr(e, "connectAs")?;
    Ok(CurveStyle {
        connect_mode: ConnectMode::parse(&connect)
            .ok_or_else(|| anyhow!("Unbekannter Verbindungsmodus '{connect}'"))?,
        line_width: parse_number(&required_attr(e, "lineWidth")?, "lineWidth")?,
        point_radius: parse_number(&required_attr(e, "pointRadius")?, "pointRadius")?,
        point_color: parse_color(&required_attr(e, "pointColor")?)?,
    })
}

fn read_point(e: &BytesStart) -> Result<Point> {
    let identifier = required_attr(e, "identifier")?;
    let ordinal = parse_number(&required_attr(e, "ordinal")?, "ordinal")?;
    let screen = DVec2::new(
        parse_number(&required_attr(e, "screenX")?, "screenX")?,
        parse_number(&required_attr(e, "screenY")?, "screenY")?,
    );
    let graph = DVec2::new(
        parse_number(&required_attr(e, "graphX")?, "graphX")?,
        parse_number(&required_attr(e, "graphY")?, "graphY")?,
    );
    Ok(Point::new(identifier, screen, graph, ordinal))
}

/// Liest ein Pflicht-Attribut (Fehlen ist ein Parse-Abbruch).
pub(crate) fn required_attr(e: &BytesStart, name: &str) -> Result<String> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    bail!("Pflicht-Attribut '{name}' fehlt")
}

fn parse_number(text: &str, what: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .with_context(|| format!("Wert '{text}' fuer '{what}' ist keine Zahl"))
}

fn parse_color(text: &str) -> Result<[f32; 4]> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 4 {
        bail!("Farbwert '{text}' hat nicht vier Komponenten");
    }
    let mut color = [0.0f32; 4];
    for (slot, part) in color.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Farbkomponente '{part}' ist keine Zahl"))?;
    }
    Ok(color)
}
