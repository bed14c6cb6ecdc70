/// A library text inserted when seeding an empty database.
pub struct SampleText {
    pub content: &'static str,
    pub level: &'static str,
    pub difficulty: &'static str,
}

pub const SAMPLE_TEXTS: &[SampleText] = &[
    SampleText {
        content: "Le cycle de l'eau, également connu sous le nom de cycle hydrologique, est le processus par lequel l'eau circule entre l'océan, l'atmosphère et la terre. Ce cycle est essentiel à la vie sur Terre.

La première étape majeure est l'évaporation. Le soleil chauffe l'eau des océans, des lacs et des rivières, la transformant en vapeur d'eau qui monte dans l'atmosphère. Les plantes contribuent également à ce processus par la transpiration.

Ensuite vient la condensation. En altitude, la vapeur d'eau se refroidit et se transforme en de minuscules gouttelettes d'eau ou des cristaux de glace, formant ainsi les nuages.

La dernière étape est la précipitation. Lorsque les gouttelettes d'eau dans les nuages deviennent trop lourdes, elles tombent sur la Terre sous forme de pluie, de neige, de grêle ou de grésil. Une partie de cette eau s'infiltre dans le sol, tandis que l'autre ruisselle vers les cours d'eau pour retourner à l'océan.",
        level: "CM1",
        difficulty: "moyenne",
    },
    SampleText {
        content: "La photosynthèse est le processus biochimique fondamental qui permet aux plantes vertes, aux algues et à certaines bactéries de convertir l'énergie lumineuse du soleil en énergie chimique. Cette énergie est stockée sous forme de glucides, comme le glucose.

Pour réaliser la photosynthèse, les plantes ont besoin de trois éléments principaux : la lumière du soleil, l'eau (absorbée par les racines) et le dioxyde de carbone (CO2) (absorbé par les feuilles). Le processus se déroule dans des organites cellulaires appelés chloroplastes, qui contiennent un pigment vert, la chlorophylle.

L'un des sous-produits les plus importants de la photosynthèse est l'oxygène (O2). Ce gaz, indispensable à la respiration de la plupart des êtres vivants, y compris les humains, est libéré dans l'atmosphère.",
        level: "6ème",
        difficulty: "moyenne",
    },
];
