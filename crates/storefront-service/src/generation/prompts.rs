//! 提示词模板

/// 设计图生成提示词
pub fn svg_design(description: &str, color: &str) -> String {
    format!(
        "Generate a minimalist SVG design for a t-shirt based on this description: \"{description}\". \
         The t-shirt color is {color}. Return ONLY the raw SVG code. Do not include markdown backticks. \
         The SVG should be high quality, scalable, and suitable for printing. \
         Ensure the background is transparent or matches the t-shirt color if necessary."
    )
}

/// 提示词优化
pub fn enhance(prompt: &str) -> String {
    format!(
        "You are an expert AI art prompt engineer for T-shirt designs. \
         Rewrite the following user prompt to be more descriptive, artistic, and suitable for a high-quality T-shirt print. \
         Keep it under 30 words. Focus on visual style, composition, and mood. \
         Do not add conversational text, just return the enhanced prompt.\n\nUser Prompt: \"{prompt}\""
    )
}

/// 商品命名建议
pub fn suggest_name(description: &str) -> String {
    format!(
        "Generate a creative, catchy, and short (3-5 words) T-shirt product name based on the following design description. \
         Do not use quotes. Just return the name.\n\nDesign Description: \"{description}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_prompt_embeds_description_and_color() {
        let prompt = svg_design("a fox in the snow", "Navy Blue");
        assert!(prompt.contains("description: \"a fox in the snow\". The t-shirt color is Navy Blue."));
        assert!(prompt.contains("Return ONLY the raw SVG code."));
    }

    #[test]
    fn test_text_prompts() {
        assert!(enhance("cat").ends_with("User Prompt: \"cat\""));
        assert!(enhance("cat").contains("under 30 words"));
        assert!(suggest_name("cat").ends_with("Design Description: \"cat\""));
        assert!(suggest_name("cat").contains("(3-5 words)"));
    }
}
