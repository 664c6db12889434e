// Shared prompt fragments and template utilities.
// Endpoint templates live in simulation::prompts; this file holds what they share.

use crate::guidelines::Guidelines;

/// Persona line opening every clinician-voiced template.
pub const EDUCATOR_PERSONA: &str = "あなたは経験豊富な糖尿病療養指導士であり、看護師です。";

const GUIDELINE_HEADER: &str = "--- 糖尿病診療ガイドライン2024 ---";
const GUIDELINE_FOOTER: &str = "----------------------------------";

/// Renders the framed guideline block interpolated as `{guidelines}`.
pub fn guideline_block(guidelines: &Guidelines) -> String {
    format!(
        "{GUIDELINE_HEADER}\n{}\n{}\n{GUIDELINE_FOOTER}",
        guidelines.part1(),
        guidelines.part2()
    )
}

/// Substitutes `{name}` slots in a single left-to-right pass.
///
/// Substituted values are never re-scanned, so caller text containing `{...}`
/// cannot expand into another slot. Unknown slots are emitted unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after
            .find('}')
            .map(|close| &after[..close])
            .and_then(|name| values.iter().find(|(key, _)| *key == name));

        match slot {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
