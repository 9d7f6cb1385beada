//! Least-Squares-Fit der affinen Abbildung Screen → Graph.

use glam::{DMat2, DVec2};
use nalgebra::{DMatrix, DVector};

use super::TransformError;

/// Relative Schwelle, unter der Singulaerwerte als Null gelten.
const RANK_TOLERANCE: f64 = 1e-10;

/// Fittet `graph ≈ A * screen + b` ueber alle Punktpaare.
///
/// Mit genau drei nicht-kollinearen Paaren ist die Loesung exakt
/// (Interpolation); mit mehr Paaren die Least-Squares-Bestapproximation.
/// Kollineare Screen-Positionen machen das System rangdefizient und werden
/// als degenerierte Kalibrierung gemeldet.
pub(super) fn fit_affine(
    screen: &[DVec2],
    graph: &[DVec2],
) -> Result<(DMat2, DVec2), TransformError> {
    let n = screen.len();
    if n < 3 {
        return Err(TransformError::TooFewPoints { needed: 3, got: n });
    }
    debug_assert_eq!(screen.len(), graph.len());

    let mut m = DMatrix::<f64>::zeros(n, 3);
    let mut gx = DVector::<f64>::zeros(n);
    let mut gy = DVector::<f64>::zeros(n);
    for (i, (s, g)) in screen.iter().zip(graph.iter()).enumerate() {
        m[(i, 0)] = s.x;
        m[(i, 1)] = s.y;
        m[(i, 2)] = 1.0;
        gx[i] = g.x;
        gy[i] = g.y;
    }

    let svd = m.svd(true, true);

    let sv_max = svd.singular_values.max();
    let sv_min = svd.singular_values.min();
    if !sv_max.is_finite() || sv_min <= sv_max * RANK_TOLERANCE {
        return Err(TransformError::DegenerateCalibration(
            "Kalibrierungspunkte sind kollinear".to_string(),
        ));
    }

    let cx = svd
        .solve(&gx, sv_max * RANK_TOLERANCE)
        .map_err(|msg| TransformError::DegenerateCalibration(msg.to_string()))?;
    let cy = svd
        .solve(&gy, sv_max * RANK_TOLERANCE)
        .map_err(|msg| TransformError::DegenerateCalibration(msg.to_string()))?;

    let a = DMat2::from_cols(DVec2::new(cx[0], cy[0]), DVec2::new(cx[1], cy[1]));
    let b = DVec2::new(cx[2], cy[2]);

    Ok((a, b))
}

/// Invertiert die gefittete Abbildung analytisch.
///
/// Eine singulaere Matrix bedeutet, dass die Graph-Werte keine Flaeche
/// aufspannen (z.B. Achsenspanne null), ebenfalls degenerierte Kalibrierung.
pub(super) fn invert_affine(a: DMat2, b: DVec2) -> Result<(DMat2, DVec2), TransformError> {
    let det = a.determinant();
    let scale = a.x_axis.length() * a.y_axis.length();
    if !det.is_finite() || scale == 0.0 || det.abs() <= scale * RANK_TOLERANCE {
        return Err(TransformError::DegenerateCalibration(
            "Achsenwerte spannen keine Flaeche auf".to_string(),
        ));
    }

    let inv_a = a.inverse();
    let inv_b = -(inv_a * b);
    Ok((inv_a, inv_b))
}
