//! Rendering of a selection error rate distribution as a text table or an
//! SVG bar chart.

use std::io::{self, Write};

use plotters::prelude::*;
use topc_privacy_accounting::SerDistribution;

const BAR_WIDTH: usize = 40;
const SVG_SIZE: (u32, u32) = (1000, 600);
const SVG_BAR_HALF_WIDTH: f64 = 0.004;
const CDF_LABEL: &str = "Pr(SER <= x) >= 1 - beta";
const PDF_LABEL: &str = "Pr(SER = x)";

/// Title line for a distribution computed on `dataset`.
pub fn title(dist: &SerDistribution, dataset: &str) -> String {
    format!(
        "SER distribution on {dataset}, k = {}, c = {}, epsilon = {}",
        dist.k, dist.c, dist.epsilon
    )
}

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

/// Write the CDF and PDF side by side, one row per retained point.
///
/// Rows show `x`, `Pr(SER <= x) >= 1 - beta` and `Pr(SER = x) ~ mass`.
pub fn render_distribution<W: Write>(
    dist: &SerDistribution,
    dataset: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", title(dist, dataset))?;
    writeln!(
        out,
        "T = {}, epsilon1 = {:.6}, epsilon2 = {:.6}, {} relaxations sampled, {} points kept",
        dist.threshold,
        dist.rescaled.epsilon1,
        dist.rescaled.epsilon2,
        dist.samples,
        dist.cdf.len()
    )?;
    writeln!(
        out,
        "{:>8}  {:>10}  {:<w$}  {:>10}  {:<w$}",
        "x",
        "Pr(<=x)",
        "",
        "Pr(=x)",
        "",
        w = BAR_WIDTH
    )?;
    for (point, mass) in dist.cdf.points().iter().zip(&dist.pdf.mass) {
        writeln!(
            out,
            "{:>8.4}  {:>10.6}  {}  {:>10.6}  {}",
            point.x,
            point.y,
            bar(point.y),
            mass,
            bar(*mass)
        )?;
    }
    Ok(())
}

fn svg_bar(x: f64, height: f64, color: RGBAColor) -> Rectangle<(f64, f64)> {
    Rectangle::new(
        [
            (x - SVG_BAR_HALF_WIDTH, 0.0),
            (x + SVG_BAR_HALF_WIDTH, height.clamp(0.0, 1.0)),
        ],
        color.filled(),
    )
}

/// Draw the CDF (red) and PDF (blue) as overlaid bar series and return the
/// SVG document.
pub fn render_svg(dist: &SerDistribution, dataset: &str) -> anyhow::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SVG_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title(dist, dataset), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.05f64)?;

        chart
            .configure_mesh()
            .x_desc("selection error rate")
            .y_desc("probability")
            .draw()?;

        chart
            .draw_series(
                dist.cdf
                    .points()
                    .iter()
                    .map(|p| svg_bar(p.x, p.y, RED.mix(0.6))),
            )?
            .label(CDF_LABEL)
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], RED.mix(0.6).filled())
            });
        chart
            .draw_series(
                dist.cdf
                    .points()
                    .iter()
                    .zip(&dist.pdf.mass)
                    .map(|(p, mass)| svg_bar(p.x, *mass, BLUE.mix(0.6))),
            )?
            .label(PDF_LABEL)
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], BLUE.mix(0.6).filled())
            });

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        root.present()?;
    }
    Ok(svg)
}
