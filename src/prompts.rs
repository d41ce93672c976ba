use crate::rating::OutfitContext;

pub const CLASSIFY: &str = include_str!("../data/prompts/classify.txt");
pub const RECOMMEND: &str = include_str!("../data/prompts/recommend.txt");
pub const RATE: &str = include_str!("../data/prompts/rate.txt");
pub const IMAGE: &str = include_str!("../data/prompts/image.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass: placeholders appearing inside substituted
/// values are left untouched. Unknown placeholders are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// One `- name` line per item, in the given order.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn classify_prompt() -> String {
    CLASSIFY.trim().to_string()
}

pub fn recommend_prompt<S: AsRef<str>>(item_names: &[S]) -> String {
    render(RECOMMEND, &[("items", &bullet_list(item_names))])
        .trim()
        .to_string()
}

pub fn rate_prompt(description: &str, context: &OutfitContext) -> String {
    render(
        RATE,
        &[
            ("description", description.trim()),
            ("venue", &context.venue),
            ("weather", &context.weather),
            ("preference", &context.preference),
        ],
    )
    .trim()
    .to_string()
}

pub fn image_prompt(prompt: &str) -> String {
    render(IMAGE, &[("prompt", prompt.trim())]).trim().to_string()
}
