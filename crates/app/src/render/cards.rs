//! HTML card renderer — one card per automation.

use std::fmt::Write;

use autoviz_domain::automation::Automation;

use super::escape;

/// Render the automation list as a grid of HTML cards.
///
/// Each card shows the automation name followed by its trigger,
/// condition, and action chips. Empty sections are omitted.
#[must_use]
pub fn render(automations: &[Automation]) -> String {
    let mut html = String::from("<div class=\"automations\">");
    for automation in automations {
        html.push_str("<article class=\"automation-card\">");
        let _ = write!(
            html,
            "<h2 class=\"automation-name\">{}</h2>",
            escape(&automation.display_name())
        );
        section(
            &mut html,
            "Triggers",
            "triggers",
            automation
                .triggers
                .iter()
                .map(|t| (t.kind(), t.detail())),
        );
        section(
            &mut html,
            "Conditions",
            "conditions",
            automation
                .conditions
                .iter()
                .map(|c| (c.kind(), c.detail())),
        );
        section(
            &mut html,
            "Actions",
            "actions",
            automation.actions.iter().map(|a| (a.kind(), a.detail())),
        );
        html.push_str("</article>");
    }
    html.push_str("</div>");
    html
}

fn section<I>(html: &mut String, title: &str, class: &str, chips: I)
where
    I: Iterator<Item = (String, Option<String>)>,
{
    let chips: Vec<_> = chips.collect();
    if chips.is_empty() {
        return;
    }
    let _ = write!(html, "<section class=\"block {class}\"><h3>{title}</h3><ul>");
    for (kind, detail) in chips {
        html.push_str("<li class=\"chip\">");
        let _ = write!(html, "<span class=\"kind\">{}</span>", escape(&kind));
        if let Some(detail) = detail {
            let _ = write!(html, "<span class=\"detail\">{}</span>", escape(&detail));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></section>");
}
