//! Charts drawn by code cells (WCAG 1.1.1, 1.4.1).
//!
//! The rendered figure is not available, so this works from the plotting
//! code and the prose around it.

use regex::Regex;
use std::sync::LazyLock;

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;

/// Calls that draw a chart with matplotlib, pandas or Altair.
const CHART_MARKERS: &[&str] = &["plt.figure", "plt.plot", "plt.bar", "alt.Chart", ".plot("];

/// Markdown next to a chart must be longer than this to describe it.
const MIN_DESCRIPTION_CHARS: usize = 20;

static PIE_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.pie\s*\(").unwrap());
static COLOR_ARG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"color\s*=").unwrap());
static LABEL_ARG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"label\s*=").unwrap());

/// Checks that charts are described in prose and do not encode data by color alone.
pub struct ChartCheck;

impl Check for ChartCheck {
    fn name(&self) -> &str {
        "charts"
    }

    fn description(&self) -> &str {
        "Charts have a nearby text description and do not rely on color alone"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let cells = notebook.cells();

        for (idx, cell) in notebook.code_cells() {
            let location = Location::cell(idx);
            let source = cell.text();

            if CHART_MARKERS.iter().any(|m| source.contains(m)) {
                let neighbors = [idx.checked_sub(1), Some(idx + 1)];
                let described = neighbors
                    .into_iter()
                    .flatten()
                    .filter_map(|i| cells.get(i))
                    .any(|c| {
                        c.is_markdown()
                            && c.text().trim().chars().count() > MIN_DESCRIPTION_CHARS
                    });

                if described {
                    issues.push(Issue::success(
                        Category::CHART_DESCRIBED,
                        location,
                        "Chart has a nearby textual description",
                    ));
                } else {
                    issues.push(
                        Issue::warning(
                            Category::CHART_DESCRIPTION,
                            location,
                            "Chart without nearby textual description",
                        )
                        .with_wcag(wcag::NON_TEXT_CONTENT)
                        .with_remediation(
                            "Add a markdown cell before or after the chart describing what it shows",
                        ),
                    );
                }
            }

            issues.extend(
                color_findings(&source)
                    .into_iter()
                    .map(|message| plot_color(location, message)),
            );
        }

        Ok(issues)
    }
}

/// Ways a plotting cell may encode information by color alone.
fn color_findings(source: &str) -> Vec<&'static str> {
    let mut found = Vec::new();

    if source.contains("plt.") || source.contains("matplotlib") {
        if PIE_CALL.is_match(source) {
            found.push("Pie chart detected; it may rely on color alone");
        }
        if COLOR_ARG.is_match(source) && !LABEL_ARG.is_match(source) {
            found.push("Color used in plot without labels");
        }
    }

    let altair = source.contains("alt.Chart") || source.contains("import altair");
    let colored = source.contains("color=") || source.contains("Color(");
    let explained = source.contains(".properties(title=") || source.contains("description=");
    if altair && colored && !explained {
        found.push("Altair chart uses color without a title or description");
    }

    found
}

fn plot_color(location: Location, message: &str) -> Issue {
    Issue::warning(Category::PLOT_COLOR, location, message)
        .with_wcag(wcag::USE_OF_COLOR)
        .with_remediation(
            "Add labels, patterns or a text description so the chart does not depend on color",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::checks::run;
    use crate::model::Cell;

    fn categories(issues: &[Issue]) -> Vec<Category> {
        issues.iter().map(Issue::category).collect()
    }

    #[test]
    fn test_chart_needs_nearby_description() {
        let issues = run(
            &ChartCheck,
            vec![
                Cell::markdown("# Sales"),
                Cell::code("df.plot(kind='line')"),
                Cell::code("plt.figure()\nplt.plot(xs, ys)"),
                Cell::markdown("The line rises steadily through the year."),
            ],
        );
        assert_eq!(
            categories(&issues),
            vec![Category::CHART_DESCRIPTION, Category::CHART_DESCRIBED]
        );
        assert_eq!(issues[0].location(), Location::Cell(2));
        assert_eq!(issues[1].location(), Location::Cell(3));
    }

    #[test]
    fn test_plain_code_is_ignored() {
        let issues = run(&ChartCheck, vec![Cell::code("plot(sales)\nx = 1")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_matplotlib_color_use() {
        let issues = run(
            &ChartCheck,
            vec![
                Cell::markdown("Market share of each product line this quarter."),
                Cell::code("plt.pie(shares)\nplt.bar(xs, ys, color='red')"),
                Cell::markdown("Revenue by region, labelled in the legend."),
                Cell::code("plt.bar(xs, ys, color='red', label='Revenue')"),
            ],
        );
        let messages: Vec<&str> = issues
            .iter()
            .filter(|i| i.category() == Category::PLOT_COLOR)
            .map(Issue::message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Pie chart detected; it may rely on color alone",
                "Color used in plot without labels"
            ]
        );
    }

    #[test]
    fn test_altair_color_needs_description() {
        let bare = color_findings("alt.Chart(df).mark_point().encode(x='a', color='b')");
        assert_eq!(bare, vec!["Altair chart uses color without a title or description"]);

        let titled = color_findings(
            "alt.Chart(df).mark_point().encode(color='b').properties(title='Clusters')",
        );
        assert!(titled.is_empty());
    }
}
