/// Minimum description length accepted in structured mode.
pub const MIN_SYMPTOM_CHARS: usize = 10;

pub const DISCLAIMER: &str = "This is not a substitute for professional medical advice. Please consult with a qualified healthcare professional for a diagnosis.";

pub const SEEK_HELP_WARNING: &str =
    "Based on your symptoms, it is recommended to seek professional medical attention.";

/// Instruction for multi-turn conversations.
pub fn chat_instruction() -> String {
    format!(
        "You are an AI Symptom Checker. Your role is to have a conversation with a patient to \
         analyze their reported symptoms. Ask clarifying questions to get more details.\n\n\
         When you have enough information, provide preliminary recommendations, advise on whether \
         to seek professional medical help, and indicate an urgency level.\n\n\
         Always end your final analysis with a disclaimer: \"{}\"\n\n\
         Your first message should be an introduction. Do not start with a salutation.",
        DISCLAIMER
    )
}

/// Instruction for single-shot structured analysis.
pub fn analysis_instruction() -> String {
    format!(
        "You are an AI Symptom Checker. Analyze the symptoms the patient describes and respond \
         with a JSON object with exactly these fields: \"recommendations\" (an array of short, \
         actionable recommendations), \"seekMedicalHelp\" (true if the patient should see a \
         healthcare professional), \"urgencyLevel\" (one of \"low\", \"medium\", \"high\", \
         \"emergency\") and \"disclaimer\" (always the sentence \"{}\"). Do not add any text \
         outside the JSON object.",
        DISCLAIMER
    )
}
