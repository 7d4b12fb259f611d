use std::ops::RangeInclusive;

use eframe::egui::{Align2, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

use crate::color::{FEMALE_COLOR, MALE_COLOR};
use crate::state::{AppState, ChartTab};

const CHART_HEIGHT: f32 = 320.0;

/// Render the chart selected in the tab strip.
pub fn charts(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in ChartTab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.label());
        }
    });
    ui.separator();

    match state.active_tab {
        ChartTab::Distribution => distribution_plot(ui, state),
        ChartTab::TopSpecies => top_species_plot(ui, state),
        ChartTab::SexComparison => sex_comparison_plot(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Overall distribution (stacked histogram)
// ---------------------------------------------------------------------------

fn distribution_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Distribution of Median Life Expectancy");

    let hist = &state.view.histogram;
    if hist.is_empty() {
        ui.label("No rows to plot.");
    }
    let width = hist.bin_width();
    let centers = hist.centers();

    let mut charts: Vec<BarChart> = Vec::with_capacity(hist.series.len());
    for series in &hist.series {
        let bars: Vec<Bar> = centers
            .iter()
            .zip(&series.counts)
            .map(|(&x, &count)| Bar::new(x, count as f64).width(width))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(series.taxon_class.as_deref().unwrap_or("(no class)"))
            .color(state.color_map.color_for(series.taxon_class.as_deref()))
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new("distribution_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Overall_MLE")
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Top species by overall MLE
// ---------------------------------------------------------------------------

fn top_species_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Top 10 Species by Overall Median Life Expectancy");

    let ds = state.dataset;
    let rows = &state.view.top_species;
    let names: Vec<String> = rows
        .iter()
        .map(|&i| ds.records[i].display_name().to_string())
        .collect();

    // One chart per class so the legend lists classes.
    let mut charts: Vec<BarChart> = Vec::new();
    for class in classes_in(state, rows) {
        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .filter(|&(_, &i)| ds.records[i].taxon_class.as_deref() == class)
            .map(|(pos, &i)| {
                let rec = &ds.records[i];
                Bar::new(pos as f64, rec.overall_mle)
                    .width(0.7)
                    .name(rec.display_name())
            })
            .collect();
        charts.push(
            BarChart::new(bars)
                .name(class.unwrap_or("(no class)"))
                .color(state.color_map.color_for(class)),
        );
    }

    let labels: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(pos, &i)| (pos as f64, ds.records[i].overall_mle))
        .collect();

    Plot::new("top_species_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Species_Common_Name")
        .y_axis_label("Overall_MLE")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&names, mark.value)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            for (x, value) in labels {
                plot_ui.text(
                    Text::new(PlotPoint::new(x, value), format!("{value:.1}"))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// Classes present among `rows`, in dataset order, the missing class last.
fn classes_in<'a>(state: &'a AppState, rows: &[usize]) -> Vec<Option<&'a str>> {
    let ds = state.dataset;
    let mut classes: Vec<Option<&'a str>> = ds
        .taxon_classes
        .iter()
        .map(|c| Some(c.as_str()))
        .filter(|c| rows.iter().any(|&i| ds.records[i].taxon_class.as_deref() == *c))
        .collect();
    if rows.iter().any(|&i| ds.records[i].taxon_class.is_none()) {
        classes.push(None);
    }
    classes
}

// ---------------------------------------------------------------------------
// Male vs female grouped bars
// ---------------------------------------------------------------------------

fn sex_comparison_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Male vs Female Median Life Expectancy");

    let ds = state.dataset;
    let rows = &state.view.sex_comparison;
    if rows.is_empty() {
        ui.label("ℹ No male/female data available for this filter.");
        return;
    }

    let mut male = Vec::with_capacity(rows.len());
    let mut female = Vec::with_capacity(rows.len());
    for (pos, &i) in rows.iter().enumerate() {
        let rec = &ds.records[i];
        let Some((m, f)) = rec.sex_pair() else {
            continue;
        };
        let x = pos as f64;
        male.push(Bar::new(x - 0.2, m).width(0.4).name(rec.display_name()));
        female.push(Bar::new(x + 0.2, f).width(0.4).name(rec.display_name()));
    }
    let names: Vec<String> = rows
        .iter()
        .map(|&i| ds.records[i].display_name().to_string())
        .collect();

    Plot::new("sex_comparison_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Species_Common_Name")
        .y_axis_label("MLE")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&names, mark.value)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(male).name("Male_MLE").color(MALE_COLOR));
            plot_ui.bar_chart(BarChart::new(female).name("Female_MLE").color(FEMALE_COLOR));
        });
}

/// Name for an integer axis position, blank between categories.
fn category_label(names: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_at_integer_positions() {
        let names = vec!["Lion".to_string(), "Okapi".to_string()];
        assert_eq!(category_label(&names, 0.0), "Lion");
        assert_eq!(category_label(&names, 1.0), "Okapi");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }
}
