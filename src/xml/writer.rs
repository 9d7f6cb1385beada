//! Writer fuer Dokument-XML.

use crate::core::{Curve, CurveSet, Document, Point};

/// Schreibt ein Dokument als XML-String.
pub fn write_document(document: &Document) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str("<document version=\"1\">\n");

    let coords = document.coords();
    output.push_str(&format!(
        "    <coordinates scaleX=\"{}\" scaleY=\"{}\"/>\n",
        coords.scale_x.as_str(),
        coords.scale_y.as_str()
    ));

    write_curve_set_curves(&mut output, document.curve_set(), 1);

    output.push_str("</document>\n");
    output
}

/// Schreibt alle Kurven eines Sets (Achsenkurve zuerst) auf Einrueckstufe
/// `level`. Auch vom Kommando-Log verwendet.
pub(crate) fn write_curve_set_curves(output: &mut String, set: &CurveSet, level: usize) {
    for curve in set.iter_curves() {
        write_curve(output, curve, level);
    }
}

fn write_curve(output: &mut String, curve: &Curve, level: usize) {
    let pad = indent(level);
    let pad2 = indent(level + 1);
    let pad3 = indent(level + 2);

    output.push_str(&format!(
        "{pad}<curve name=\"{}\">\n",
        escape_xml(curve.name())
    ));

    let filter = curve.filter();
    output.push_str(&format!(
        "{pad2}<colorFilter mode=\"{}\" low=\"{}\" high=\"{}\"/>\n",
        filter.mode.as_str(),
        format_number(filter.low),
        format_number(filter.high)
    ));

    let style = curve.style();
    output.push_str(&format!(
        "{pad2}<curveStyle connectAs=\"{}\" lineWidth=\"{}\" pointRadius=\"{}\" pointColor=\"{}\"/>\n",
        style.connect_mode.as_str(),
        format_number(style.line_width),
        format_number(style.point_radius),
        format_color(style.point_color)
    ));

    output.push_str(&format!("{pad2}<points>\n"));
    for point in curve.points() {
        write_point(output, point, &pad3);
    }
    output.push_str(&format!("{pad2}</points>\n"));

    output.push_str(&format!("{pad}</curve>\n"));
}

fn write_point(output: &mut String, point: &Point, pad: &str) {
    output.push_str(&format!(
        "{pad}<point identifier=\"{}\" ordinal=\"{}\" screenX=\"{}\" screenY=\"{}\" graphX=\"{}\" graphY=\"{}\"/>\n",
        escape_xml(point.identifier()),
        format_number(point.ordinal()),
        format_number(point.pos_screen().x),
        format_number(point.pos_screen().y),
        format_number(point.pos_graph().x),
        format_number(point.pos_graph().y)
    ));
}

fn indent(level: usize) -> String {
    "    ".repeat(level)
}

/// Kuerzeste Darstellung, die beim Parsen exakt denselben f64 liefert
/// (Roundtrip-Faehigkeit der Dokumente).
fn format_number(value: f64) -> String {
    value.to_string()
}

fn format_color(color: [f32; 4]) -> String {
    color
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

pub(crate) fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        // Tab trennt Kurvenname und Nummer im Identifier; als numerische
        // Entity schreiben, damit Parser ihn nicht zu Whitespace normalisieren
        .replace('\t', "&#9;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml_entities() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("Kurve1\t3"), "Kurve1&#9;3");
    }

    #[test]
    fn test_format_number_roundtrips() {
        for value in [0.1, 1.0 / 3.0, -273.15, 1e-12] {
            let text = format_number(value);
            assert_eq!(text.parse::<f64>().unwrap(), value);
        }
    }
}
