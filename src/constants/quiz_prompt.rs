pub const CHATML_SYSTEM_OPEN: &str = "<|im_start|>system\n";
pub const CHATML_USER_OPEN: &str = "<|im_start|>user\n";
pub const CHATML_ASSISTANT_OPEN: &str = "<|im_start|>assistant\n";
pub const CHATML_CLOSE: &str = "<|im_end|>";

pub const BLANK_MARKER: &str = "______";

pub const MCQ_ROLE: &str = "Tu es un assistant expert en génération de questions à choix multiples (QCM) en français, basées sur un texte fourni.";

pub const FILL_BLANK_ROLE: &str = "Tu es un assistant expert en génération de questions de type 'compléter la phrase' (fill-in-the-blank) en français, basées sur un texte fourni, avec quatre options de réponse et la bonne réponse indiquée.";

pub const MCQ_OUTPUT_TEMPLATE: &str = "Le format de sortie doit être :
Question: [Ta question]
Options:
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Réponse: [Lettre de la bonne réponse, e.g., A]";

pub const FILL_BLANK_OUTPUT_TEMPLATE: &str = "Le format de sortie doit être :
Question: [Ta question avec un ______ pour le blanc]
Options:
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Réponse: [Lettre de la bonne réponse, e.g., B]";

pub const MCQ_DIRECTIVE: &str = "Génère un QCM à partir de ce texte.";

pub const FILL_BLANK_DIRECTIVE: &str = "Génère une question 'compléter la phrase' avec des options (A, B, C, D) et la réponse à partir de ce texte. La question doit contenir un blanc visible (______).";
