//! Model outputs and documents used across the test suites.

/// Completion that follows the requested template exactly.
pub const CANONICAL_MCQ: &str = "Question: Quelle est la première étape du cycle de l'eau ?
Options:
A) La condensation
B) L'évaporation
C) La précipitation
D) Le ruissellement
Réponse: B";

pub const CANONICAL_FILL_BLANK: &str = "Question: Le soleil chauffe l'eau des océans, ce qui provoque son ______.
Options:
A) gel
B) évaporation
C) stockage
D) filtrage
Réponse: B";

/// Option C is missing its marker.
pub const MISSING_C: &str = "Question: Où se forment les nuages ?
Options:
A) Dans le sol
B) Dans l'atmosphère
D) Dans les nappes
Réponse: B";

/// Answer points at option C, which cannot be recovered.
pub const ANSWER_ON_MISSING_OPTION: &str = "Question: Où se forment les nuages ?
Options:
A) Dans le sol
B) Dans l'atmosphère
D) Dans les nappes
Réponse: C";

pub const FREE_PROSE: &str =
    "Je ne peux pas générer de question à partir de ce texte, il est trop court.";

/// Three paragraphs separated by blank lines.
pub const SAMPLE_DOCUMENT: &str = "Le cycle de l'eau est le processus continu de circulation de l'eau sur Terre. Il commence par l'évaporation.

Sous l'effet de la chaleur du soleil, l'eau des océans et des lacs se transforme en vapeur et monte dans l'atmosphère.

En altitude, la vapeur se refroidit et se condense pour former des nuages, puis retombe sous forme de pluie ou de neige.";
