use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{ColorMap, blues};
use crate::data::aggregate::{CountrySalary, Histogram, Metrics, RoleSalary};
use crate::format::{format_count, format_usd};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(44, 123, 229);
const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 30);

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Four headline cards. The empty view shows the zero sentinel.
pub fn metric_cards(ui: &mut Ui, metrics: &Metrics) {
    let cards = [
        ("Salário médio", format_usd(metrics.mean_salary)),
        ("Salário máximo", format_usd(metrics.max_salary)),
        ("Total de registros", format_count(metrics.count)),
        ("Cargo mais frequente", metrics.most_frequent_role.clone()),
    ];

    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(label);
                ui.label(RichText::new(value).size(24.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Chart grid
// ---------------------------------------------------------------------------

/// The 2×2 chart grid. Each cell falls back to a warning when nothing is
/// visible.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let charts = state.charts.as_ref();
    let featured = state.options.featured_role.as_str();

    ui.columns(2, |cols: &mut [Ui]| {
        match charts {
            Some(c) => top_roles_chart(&mut cols[0], &c.top_roles),
            None => no_data(&mut cols[0], "cargos"),
        }
        match charts {
            Some(c) => histogram_chart(&mut cols[1], &c.histogram),
            None => no_data(&mut cols[1], "distribuição"),
        }
    });

    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        match charts {
            Some(c) => remote_donut(&mut cols[0], &c.remote_counts, &state.remote_colors),
            None => no_data(&mut cols[0], "tipos de trabalho"),
        }
        match charts {
            Some(c) => country_chart(&mut cols[1], &c.country_means, featured),
            None => no_data(&mut cols[1], "países"),
        }
    });
}

fn no_data(ui: &mut Ui, chart: &str) {
    ui.colored_label(
        WARNING_COLOR,
        format!("Nenhum dado para exibir no gráfico de {chart}."),
    );
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Horizontal bars, highest mean at the top.
fn top_roles_chart(ui: &mut Ui, roles: &[RoleSalary]) {
    ui.strong(format!("Top {} cargos por salário médio", roles.len()));

    // Roles arrive highest first; draw them bottom-up so the top bar is the
    // highest paid.
    let names: Vec<String> = roles.iter().rev().map(|r| r.role.clone()).collect();
    let bars: Vec<Bar> = roles
        .iter()
        .rev()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean_salary)
                .name(format!("{}: {}", r.role, format_usd(r.mean_salary)))
                .width(0.7)
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("top_roles_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Média salarial anual (USD)")
        .y_axis_formatter(move |mark, _range| category_label(&names, mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn histogram_chart(ui: &mut Ui, hist: &Histogram) {
    ui.strong(format!(
        "Distribuição de salários anuais ({} registros)",
        format_count(hist.total())
    ));

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (lo, hi) = hist.bin_range(i);
            Bar::new((lo + hi) / 2.0, count as f64)
                .name(format!("{} – {}", format_usd(lo), format_usd(hi)))
                .width(hist.bin_width)
                .fill(BAR_COLOR)
                .stroke(Stroke::new(0.5, Color32::WHITE))
        })
        .collect();

    Plot::new("salary_histogram_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Faixa salarial (USD)")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Donut with percentage labels and a legend underneath.
fn remote_donut(ui: &mut Ui, counts: &[(String, usize)], colors: &ColorMap) {
    ui.strong("Proporção dos tipos de trabalho");

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT - 40.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = rect.height().min(rect.width()) / 2.0 - 4.0;
    let inner = outer * 0.5;

    let text_color = ui.visuals().strong_text_color();
    let mut start = -TAU / 4.0;
    for (mode, n) in counts {
        let share = *n as f32 / total.max(1) as f32;
        let sweep = share * TAU;
        let fill = colors.color_for(mode);

        // One convex quad per small arc step.
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            let quad = vec![
                polar(center, inner, a0),
                polar(center, outer, a0),
                polar(center, outer, a1),
                polar(center, inner, a1),
            ];
            painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
        }

        let mid = polar(center, (inner + outer) / 2.0, start + sweep / 2.0);
        painter.text(
            mid,
            Align2::CENTER_CENTER,
            format!("{:.1}%", share * 100.0),
            FontId::proportional(12.0),
            text_color,
        );
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (mode, n) in counts {
            ui.colored_label(colors.color_for(mode), "⏺");
            ui.label(format!("{mode} ({})", format_count(*n)));
        }
    });
}

/// Mean salary of the featured role per country, shaded on a blue scale.
fn country_chart(ui: &mut Ui, countries: &[CountrySalary], role: &str) {
    ui.strong(format!("Salário médio de {role} por país"));

    if countries.is_empty() {
        no_data(ui, "países");
        return;
    }

    let (lo, hi) = countries.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        (lo.min(c.mean_salary), hi.max(c.mean_salary))
    });
    let span = hi - lo;

    let names: Vec<String> = countries.iter().map(|c| c.country.clone()).collect();
    let bars: Vec<Bar> = countries
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let t = if span > 0.0 { (c.mean_salary - lo) / span } else { 1.0 };
            Bar::new(i as f64, c.mean_salary)
                .name(format!("{}: {}", c.country, format_usd(c.mean_salary)))
                .width(0.8)
                .fill(blues(0.2 + 0.8 * t))
        })
        .collect();

    Plot::new("country_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("Salário médio (USD)")
        .x_axis_formatter(move |mark, _range| category_label(&names, mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// -- helpers --

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

/// Axis label for a categorical axis: the name at integer positions, blank
/// elsewhere.
fn category_label(names: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integers() {
        let names = vec!["USA".to_string(), "BRA".to_string()];
        assert_eq!(category_label(&names, 0.0), "USA");
        assert_eq!(category_label(&names, 1.0), "BRA");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }
}
