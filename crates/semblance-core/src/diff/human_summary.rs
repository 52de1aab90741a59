//! Human-readable summary renderer for comparison reports.

use crate::canonical::CanonicalValue;
use crate::diff::model::ComparisonReport;
use semblance_reflect::ScalarValue;

/// Render a human-readable Markdown/text summary of a [`ComparisonReport`].
///
/// The summary is intended for test failure output and review displays. It is
/// informational only and does not affect the structured report.
pub fn render_human_summary(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str("## Structural Comparison\n\n");

    if report.equal {
        out.push_str("**Result**: Equal\n\n_No divergences detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Result**: Unequal ({} divergence{})\n\n",
        report.divergences.len(),
        if report.divergences.len() == 1 { "" } else { "s" }
    ));

    out.push_str("### Divergences\n\n");
    for divergence in &report.divergences {
        out.push_str(&format!(
            "- `{}`: {} → {}\n",
            divergence.path,
            render_value(divergence.left.as_ref()),
            render_value(divergence.right.as_ref()),
        ));
    }
    out.push('\n');

    out
}

/// Render one canonical value (or absence) as a short display string.
fn render_value(value: Option<&CanonicalValue>) -> String {
    let Some(value) = value else {
        return "(absent)".to_string();
    };
    match value {
        CanonicalValue::Scalar(ScalarValue::Str(s)) => format!("\"{}\"", s),
        CanonicalValue::Scalar(ScalarValue::Bytes(bytes)) => {
            format!("0x{}", short(&hex::encode(bytes)))
        }
        CanonicalValue::Scalar(ScalarValue::Bool(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::I32(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::I64(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::U32(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::U64(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::F32(v)) => v.to_string(),
        CanonicalValue::Scalar(ScalarValue::F64(v)) => v.to_string(),
        CanonicalValue::Enum(number) => format!("enum({})", number),
        CanonicalValue::Message(m) => {
            if m.invalid {
                format!("null {}", m.type_name)
            } else {
                format!("{} ({} field{})", m.type_name, m.entries.len(), plural(m.entries.len()))
            }
        }
        CanonicalValue::List(elements) => {
            format!("[{} element{}]", elements.len(), plural(elements.len()))
        }
        CanonicalValue::Map(entries) => {
            format!("{{{} entr{}}}", entries.len(), if entries.len() == 1 { "y" } else { "ies" })
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Return the first 12 characters of a hex string for display purposes.
fn short(digest: &str) -> &str {
    let end = digest.len().min(12);
    &digest[..end]
}
