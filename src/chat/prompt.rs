/// Build the practitioner prompt sent to the generative API.
///
/// The herb sentence is only present when the user is viewing a specific herb.
pub fn build_prompt(herb: Option<&str>, question: &str) -> String {
    let herb_line = herb
        .filter(|h| !h.trim().is_empty())
        .map(|h| format!("The user is currently exploring the herb \"{}\".", h.trim()))
        .unwrap_or_default();

    format!(
        "You are an experienced Ayurvedic practitioner and herb expert. {} \n\n\
         User Question: \"{}\"\n\n\
         Provide a helpful, accurate response based on traditional Ayurvedic knowledge and modern scientific understanding. Include:\n\
         - Ayurvedic perspective (dosha balancing, traditional uses)\n\
         - Modern scientific insights when available\n\
         - Practical usage guidance\n\
         - Important precautions if relevant\n\n\
         Keep your response concise but comprehensive.",
        herb_line, question
    )
}
