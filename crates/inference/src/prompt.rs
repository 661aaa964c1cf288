/// Build the domain-analysis prompt for one skeleton batch.
///
/// The skeletons carry signatures only; the model is asked for a strict JSON
/// payload so the tolerant parser has a fighting chance.
pub fn build_domain_prompt(skeleton_text: &str, context_hint: Option<&str>) -> String {
    let context = context_hint
        .filter(|hint| !hint.trim().is_empty())
        .map(|hint| format!("\nAdditional context: {hint}\n"))
        .unwrap_or_default();

    format!(
        "You are a senior software architect mapping the functional domains of a codebase.\n\
         \n\
         Analyze the following code skeletons (implementation details removed for clarity):\n\
         \n\
         {skeleton_text}\n\
         {context}\n\
         Identify the functional domains present in this code. For each domain report:\n\
         1. A short name\n\
         2. A one-sentence description of its responsibility\n\
         3. The component names that belong to it, exactly as written above\n\
         4. A confidence between 0 and 1\n\
         5. The names of related domains\n\
         \n\
         Respond with ONLY valid JSON in this format:\n\
         {{\n\
         \u{20}\u{20}\"domains\": [\n\
         \u{20}\u{20}\u{20}\u{20}{{\n\
         \u{20}\u{20}\u{20}\u{20}\u{20}\u{20}\"name\": \"Authentication\",\n\
         \u{20}\u{20}\u{20}\u{20}\u{20}\u{20}\"description\": \"User login and session management\",\n\
         \u{20}\u{20}\u{20}\u{20}\u{20}\u{20}\"confidence\": 0.95,\n\
         \u{20}\u{20}\u{20}\u{20}\u{20}\u{20}\"members\": [\"AuthService\", \"SessionManager\"],\n\
         \u{20}\u{20}\u{20}\u{20}\u{20}\u{20}\"relationships\": [\"UserManagement\"]\n\
         \u{20}\u{20}\u{20}\u{20}}}\n\
         \u{20}\u{20}]\n\
         }}"
    )
}
