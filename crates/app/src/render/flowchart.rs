//! SVG flowchart renderer.
//!
//! Layout mirrors the classic top-to-bottom flowchart: one column per
//! automation, a rounded name box on top, then trigger, condition, and
//! action nodes. Edges follow the automation's structure — name to each
//! trigger, last trigger to each condition, last condition (or trigger)
//! to each action, with a `yes` label on the condition branch.

use std::fmt::Write;

use autoviz_domain::automation::Automation;

use super::escape;

const NODE_W: i32 = 220;
const NODE_H: i32 = 54;
const V_GAP: i32 = 38;
const COL_GAP: i32 = 48;
const MARGIN: i32 = 28;

const AUTOMATION_FILL: &str = "#4a90e2";
const TRIGGER_FILL: &str = "#50c878";
const CONDITION_FILL: &str = "#ff9f43";
const ACTION_FILL: &str = "#ee5a6f";
const BACKGROUND_FILL: &str = "#1e1e1e";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Rounded,
    Parallelogram,
    Diamond,
    Box,
}

struct Node {
    x: i32,
    y: i32,
    label: String,
    shape: Shape,
    fill: &'static str,
}

struct Edge {
    from: usize,
    to: usize,
    label: Option<&'static str>,
}

/// Render the automation list as a self-contained SVG flowchart.
#[must_use]
pub fn render(automations: &[Automation]) -> String {
    let mut nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut max_rows = 0;

    for (col, automation) in automations.iter().enumerate() {
        let rows = layout_column(col, automation, &mut nodes, &mut edges);
        max_rows = max_rows.max(rows);
    }

    let cols = i32::try_from(automations.len()).unwrap_or(i32::MAX);
    let rows = i32::try_from(max_rows).unwrap_or(i32::MAX);
    let width = MARGIN * 2 + (cols * NODE_W + (cols - 1).max(0) * COL_GAP).max(0);
    let height = MARGIN * 2 + (rows * NODE_H + (rows - 1).max(0) * V_GAP).max(0);

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" \
         width=\"{width}\" height=\"{height}\" font-family=\"Arial\" font-size=\"12\">"
    );
    let _ = write!(
        svg,
        "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" \
         markerWidth=\"7\" markerHeight=\"7\" orient=\"auto-start-reverse\">\
         <path d=\"M0,0 L10,5 L0,10 z\" fill=\"white\"/></marker></defs>"
    );
    let _ = write!(
        svg,
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{BACKGROUND_FILL}\"/>"
    );

    // Edges first so nodes paint over the lane segments.
    for edge in &edges {
        draw_edge(&mut svg, &nodes[edge.from], &nodes[edge.to], edge.label);
    }
    for node in &nodes {
        draw_node(&mut svg, node);
    }

    svg.push_str("</svg>");
    svg
}

/// Place one automation's nodes in its column; returns the row count.
fn layout_column(
    col: usize,
    automation: &Automation,
    nodes: &mut Vec<Node>,
    edges: &mut Vec<Edge>,
) -> usize {
    let x = MARGIN + i32::try_from(col).unwrap_or(0) * (NODE_W + COL_GAP);
    let mut row = 0;
    let mut place = |label: String, shape: Shape, fill: &'static str, nodes: &mut Vec<Node>| {
        let y = MARGIN + i32::try_from(row).unwrap_or(0) * (NODE_H + V_GAP);
        nodes.push(Node {
            x,
            y,
            label,
            shape,
            fill,
        });
        row += 1;
        nodes.len() - 1
    };

    let name_idx = place(
        automation.display_name(),
        Shape::Rounded,
        AUTOMATION_FILL,
        nodes,
    );

    let mut last = name_idx;
    for trigger in &automation.triggers {
        let idx = place(trigger.summary(), Shape::Parallelogram, TRIGGER_FILL, nodes);
        edges.push(Edge {
            from: name_idx,
            to: idx,
            label: None,
        });
        last = idx;
    }

    let has_conditions = !automation.conditions.is_empty();
    for condition in &automation.conditions {
        let idx = place(condition.summary(), Shape::Diamond, CONDITION_FILL, nodes);
        edges.push(Edge {
            from: last,
            to: idx,
            label: None,
        });
        last = idx;
    }

    for action in &automation.actions {
        let idx = place(action.summary(), Shape::Box, ACTION_FILL, nodes);
        edges.push(Edge {
            from: last,
            to: idx,
            label: if has_conditions { Some("yes") } else { None },
        });
    }

    row
}

fn draw_node(svg: &mut String, node: &Node) {
    let Node {
        x, y, shape, fill, ..
    } = node;
    match shape {
        Shape::Rounded => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{NODE_W}\" height=\"{NODE_H}\" \
                 rx=\"12\" fill=\"{fill}\"/>"
            );
        }
        Shape::Box => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{NODE_W}\" height=\"{NODE_H}\" \
                 rx=\"3\" fill=\"{fill}\"/>"
            );
        }
        Shape::Parallelogram => {
            let skew = 16;
            let _ = write!(
                svg,
                "<polygon points=\"{},{} {},{} {},{} {},{}\" fill=\"{fill}\"/>",
                x + skew,
                y,
                x + NODE_W,
                y,
                x + NODE_W - skew,
                y + NODE_H,
                x,
                y + NODE_H,
            );
        }
        Shape::Diamond => {
            let _ = write!(
                svg,
                "<polygon points=\"{},{} {},{} {},{} {},{}\" fill=\"{fill}\"/>",
                x + NODE_W / 2,
                y,
                x + NODE_W,
                y + NODE_H / 2,
                x + NODE_W / 2,
                y + NODE_H,
                x,
                y + NODE_H / 2,
            );
        }
    }
    draw_label(svg, node);
}

fn draw_label(svg: &mut String, node: &Node) {
    let cx = node.x + NODE_W / 2;
    let cy = node.y + NODE_H / 2;
    let lines: Vec<&str> = node.label.lines().take(2).collect();
    let _ = write!(
        svg,
        "<text x=\"{cx}\" y=\"{cy}\" fill=\"white\" text-anchor=\"middle\">"
    );
    if lines.len() == 1 {
        let _ = write!(svg, "<tspan x=\"{cx}\" dy=\"4\">{}</tspan>", escape(lines[0]));
    } else {
        let _ = write!(svg, "<tspan x=\"{cx}\" dy=\"-4\">{}</tspan>", escape(lines[0]));
        let _ = write!(svg, "<tspan x=\"{cx}\" dy=\"16\">{}</tspan>", escape(lines[1]));
    }
    svg.push_str("</text>");
}

fn draw_edge(svg: &mut String, from: &Node, to: &Node, label: Option<&str>) {
    let x1 = from.x + NODE_W / 2;
    let y1 = from.y + NODE_H;
    let x2 = to.x + NODE_W / 2;
    let y2 = to.y;

    let path = if y2 - y1 <= V_GAP {
        format!("M{x1},{y1} L{x2},{y2}")
    } else {
        // Skips one or more rows: route along a side lane so the line
        // doesn't cross intermediate nodes.
        let lane = from.x - 14;
        let out = y1 + V_GAP / 4;
        let back = y2 - V_GAP / 4;
        format!("M{x1},{y1} L{x1},{out} L{lane},{out} L{lane},{back} L{x2},{back} L{x2},{y2}")
    };
    let _ = write!(
        svg,
        "<path d=\"{path}\" fill=\"none\" stroke=\"white\" marker-end=\"url(#arrow)\"/>"
    );
    if let Some(label) = label {
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" fill=\"white\" text-anchor=\"middle\">{}</text>",
            x2 + 8,
            y2 - 6,
            escape(label)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automation(value: serde_json::Value) -> Automation {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<Automation> {
        vec![automation(serde_json::json!({
            "alias": "Porch light",
            "trigger": {"platform": "sun", "event": "sunset"},
            "condition": {"condition": "state", "entity_id": "person.home"},
            "action": {"service": "light.turn_on", "target": {"entity_id": "light.porch"}},
        }))]
    }

    #[test]
    fn should_emit_dark_background_and_svg_root() {
        let svg = render(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(BACKGROUND_FILL));
    }

    #[test]
    fn should_color_nodes_by_role() {
        let svg = render(&sample());
        assert!(svg.contains(AUTOMATION_FILL));
        assert!(svg.contains(TRIGGER_FILL));
        assert!(svg.contains(CONDITION_FILL));
        assert!(svg.contains(ACTION_FILL));
    }

    #[test]
    fn should_label_condition_branch_with_yes() {
        let svg = render(&sample());
        assert!(svg.contains(">yes</text>"));
    }

    #[test]
    fn should_not_label_yes_without_conditions() {
        let svg = render(&[automation(serde_json::json!({
            "alias": "Plain",
            "trigger": {"platform": "time", "at": "07:00"},
            "action": {"service": "light.turn_on"},
        }))]);
        assert!(!svg.contains(">yes</text>"));
    }

    #[test]
    fn should_lay_out_one_column_per_automation() {
        let many = vec![
            automation(serde_json::json!({"alias": "A"})),
            automation(serde_json::json!({"alias": "B"})),
        ];
        let svg = render(&many);
        let second_col_x = MARGIN + NODE_W + COL_GAP;
        assert!(svg.contains(&format!("x=\"{second_col_x}\"")));
    }

    #[test]
    fn should_escape_labels() {
        let svg = render(&[automation(serde_json::json!({
            "alias": "<&>",
        }))]);
        assert!(svg.contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn should_render_empty_input_as_bare_canvas() {
        let svg = render(&[]);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("<polygon"));
    }
}
