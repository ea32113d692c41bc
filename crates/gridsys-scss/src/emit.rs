//! Stylesheet assembly.
//!
//! Output sections, in order: unit helper functions, media query markers,
//! grid variables, the `html` base rule, then the `.container`, `.row` and
//! `.col` components followed by column span and offset loops.

use gridsys_core::GridSystem;

use crate::ast::{Node, Stylesheet};
use crate::variables::{
    GridVariables, MediaQueryVariable, RangeKey, TrackedProperty, media_query_variables,
};

// ── Constants ──────────────────────────────────────────────────────────

const EM_FUNCTION: &str = "@function em($px, $context: 16) {
  @return ($px / $context * 1em);
}";

const REM_FUNCTION: &str = "@function rem($px) {
  @return ($px / 16 * 1rem);
}";

/// Declaration order inside `.container`'s unconditional block.
const CONTAINER_PROPERTY_ORDER: [&str; 8] = [
    "box-sizing",
    "display",
    "flex-wrap",
    "max-width",
    "margin-right",
    "margin-left",
    "padding-right",
    "padding-left",
];

const FRACTION: &str = "percentage($numerator / $denominator)";

// ── Public API ─────────────────────────────────────────────────────────

/// Generate SCSS source for `system`.
///
/// Deterministic: the same grid system content always yields the same text.
#[must_use]
pub fn generate_scss(system: &GridSystem) -> String {
    build_stylesheet(system).to_string()
}

/// Syntax tree behind [`generate_scss`].
#[must_use]
pub fn build_stylesheet(system: &GridSystem) -> Stylesheet {
    let _span = tracing::debug_span!("scss.generate", entries = system.len()).entered();

    let markers = media_query_variables(system);
    let variables = GridVariables::collect(system, &markers);
    let span_rules = fraction_rules(&variables, 's', "width");
    let offset_rules = fraction_rules(&variables, 'o', "margin-left");

    tracing::debug!(
        markers = markers.len(),
        variables = variables.iter().count(),
        column_runs = span_rules.len(),
        "generated scss"
    );

    let mut sheet = Stylesheet::new();
    sheet.push(Node::comment("Unit"));
    sheet.push(Node::Verbatim(EM_FUNCTION.to_string()));
    sheet.push(Node::Blank);
    sheet.push(Node::Verbatim(REM_FUNCTION.to_string()));
    sheet.push(Node::Blank);

    sheet.push(Node::comment("Media Query"));
    sheet.extend(markers.iter().copied().map(MediaQueryVariable::to_node));
    sheet.push(Node::Blank);

    sheet.push(Node::comment("Grid"));
    sheet.extend(variables.iter().map(|variable| variable.to_node()));
    sheet.push(Node::Blank);

    sheet.push(Node::comment("Base"));
    sheet.push(html_rule(&variables));
    sheet.push(Node::Blank);

    sheet.push(Node::comment("Component"));
    sheet.push(container_rule(&variables));
    sheet.push(Node::Blank);
    sheet.push(row_rule(&variables));
    sheet.push(Node::Blank);
    sheet.push(col_rule(&variables));
    sheet.push(Node::Blank);
    sheet.push_separated(span_rules);
    sheet.push(Node::Blank);
    sheet.push_separated(offset_rules);
    sheet.push(Node::Blank);
    sheet
}

// ── Responsive blocks ──────────────────────────────────────────────────

/// Append `declarations` to `children`: inline for the root key, wrapped in
/// a blank-line-separated `@media` block otherwise.
fn push_for_key(children: &mut Vec<Node>, key: RangeKey, declarations: Vec<Node>) {
    match key.media_prelude() {
        None => children.extend(declarations),
        Some(prelude) => {
            children.push(Node::Blank);
            children.push(Node::rule(prelude, declarations));
        }
    }
}

/// `{side}-right` and `{side}-left` set to half the gutter of `key`.
fn half_gutter(variables: &GridVariables, key: RangeKey, side: &str, suffix: &str) -> Vec<Node> {
    variables
        .get(TrackedProperty::Gutter, key)
        .map(|gutter| {
            let value = format!("{} / 2{suffix}", gutter.reference());
            vec![
                Node::declaration(format!("{side}-right"), value.clone()),
                Node::declaration(format!("{side}-left"), value),
            ]
        })
        .unwrap_or_default()
}

fn html_rule(variables: &GridVariables) -> Node {
    let mut children = Vec::new();
    for key in variables.keys(&[TrackedProperty::Scale]) {
        let declarations = variables
            .get(TrackedProperty::Scale, key)
            .map(|scale| vec![Node::declaration("font-size", scale.reference())])
            .unwrap_or_default();
        push_for_key(&mut children, key, declarations);
    }
    Node::rule("html", children)
}

fn container_rule(variables: &GridVariables) -> Node {
    let mut children = vec![
        Node::declaration("box-sizing", "border-box"),
        Node::declaration("margin-right", "auto"),
        Node::declaration("margin-left", "auto"),
    ];
    let keys = variables.keys(&[TrackedProperty::ContentMaxWidth, TrackedProperty::Gutter]);
    for key in keys {
        let mut declarations = Vec::new();
        if let Some(max_width) = variables.get(TrackedProperty::ContentMaxWidth, key) {
            declarations.push(Node::declaration("max-width", max_width.reference()));
        }
        declarations.extend(half_gutter(variables, key, "padding", ""));

        push_for_key(&mut children, key, declarations);
        if key == RangeKey::Root {
            children.sort_by_key(|node| {
                node.property()
                    .and_then(|property| {
                        CONTAINER_PROPERTY_ORDER.iter().position(|p| *p == property)
                    })
                    .unwrap_or(usize::MAX)
            });
        }
    }
    Node::rule(".container", children)
}

fn row_rule(variables: &GridVariables) -> Node {
    let mut children = vec![
        Node::declaration("display", "flex"),
        Node::declaration("flex-wrap", "wrap"),
    ];
    for key in variables.keys(&[TrackedProperty::Gutter]) {
        let declarations = half_gutter(variables, key, "margin", " * -1");
        push_for_key(&mut children, key, declarations);
    }
    Node::rule(".row", children)
}

fn col_rule(variables: &GridVariables) -> Node {
    let mut children = vec![Node::declaration("box-sizing", "border-box")];
    for key in variables.keys(&[TrackedProperty::Gutter]) {
        let declarations = half_gutter(variables, key, "padding", "");
        push_for_key(&mut children, key, declarations);
    }
    Node::rule(".col", children)
}

// ── Column fractions ───────────────────────────────────────────────────

/// One nested `@for` loop per `columns` run.
///
/// `kind` is `s` (span) or `o` (offset); `property` receives the fraction.
fn fraction_rules(variables: &GridVariables, kind: char, property: &str) -> Vec<Node> {
    variables
        .keys(&[TrackedProperty::Columns])
        .into_iter()
        .filter_map(|key| {
            let columns = variables.get(TrackedProperty::Columns, key)?;
            let selector = format!(
                ".col.-{}{kind}#{{$numerator}}of#{{$denominator}}",
                key.prefix()
            );
            let declarations = vec![Node::declaration(property, FRACTION)];
            let body = match key.media_prelude() {
                None => declarations,
                Some(prelude) => vec![Node::rule(prelude, declarations)],
            };
            Some(Node::rule(
                format!("@for $denominator from 1 through {}", columns.reference()),
                vec![Node::rule(
                    "@for $numerator from 1 through $denominator",
                    vec![Node::rule(selector, body)],
                )],
            ))
        })
        .collect()
}
