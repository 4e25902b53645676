use stackmate_core::CapabilityTag;

/// Fixed instruction template for requirement classification. The response
/// contract is strict JSON over the published tag vocabulary.
pub fn capability_prompt(description: &str) -> String {
    let vocabulary = CapabilityTag::ALL
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following web project requirements and classify them against a fixed \
         capability vocabulary.\n\
         \n\
         Requirements:\n\
         {description}\n\
         \n\
         Respond with a single JSON object and nothing else (no prose, no Markdown fences):\n\
         {{\"capabilities\": [\"<tag>\", ...], \"expected_users\": \"small|medium|large\", \
         \"multi_tenant\": true|false}}\n\
         \n\
         Valid capability tags: {vocabulary}.\n\
         Use only tags from that list and include every tag the requirements imply."
    )
}
