use crate::core::model::{Step, SubStep};

type SubStepDef = (&'static str, &'static str, &'static str);

const TEMPLATE: &[(&str, &str, &[SubStepDef])] = &[
    (
        "planning",
        "Planning & Budget",
        &[
            (
                "set-release-date",
                "Pick a release date",
                "Leave at least four weeks for playlist pitching.",
            ),
            (
                "define-budget",
                "Draft the budget",
                "Production, artwork, ads and distribution fees.",
            ),
            (
                "choose-distributor",
                "Choose a distributor",
                "Compare fees, payout splits and pitching tools.",
            ),
        ],
    ),
    (
        "production",
        "Production",
        &[
            ("finish-mix", "Finish the mix", ""),
            (
                "master-track",
                "Master the track",
                "Deliver 24-bit WAV masters plus a loudness-normalized version.",
            ),
            ("cover-artwork", "Finalize cover artwork", "3000x3000 px, no URLs or social handles."),
        ],
    ),
    (
        "distribution",
        "Distribution",
        &[
            ("upload-distributor", "Upload to distributor", ""),
            ("register-isrc", "Register ISRC codes", ""),
            ("register-pro", "Register with a PRO", "Make sure songwriter splits are on file."),
        ],
    ),
    (
        "marketing",
        "Marketing",
        &[
            (
                "pitch-playlists",
                "Pitch to editorial playlists",
                "Submit through the distributor dashboard.",
            ),
            ("presave-campaign", "Launch pre-save campaign", ""),
            (
                "social-content",
                "Schedule social content",
                "Teasers, snippets and behind-the-scenes clips.",
            ),
            ("press-kit", "Send press kit", ""),
        ],
    ),
    (
        "release",
        "Release Week",
        &[
            ("release-day-post", "Announce on release day", ""),
            ("engage-fans", "Engage with fans", "Reply to comments and reshare fan content."),
            ("review-analytics", "Review first-week analytics", ""),
        ],
    ),
];

/// A fresh copy of the default release steps. Every call returns an
/// independent value, so callers can mutate it freely.
pub fn default_steps() -> Vec<Step> {
    TEMPLATE
        .iter()
        .map(|(id, title, sub_steps)| Step {
            id: id.to_string(),
            title: title.to_string(),
            sub_steps: sub_steps
                .iter()
                .map(|(id, title, description)| SubStep {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
                .collect(),
        })
        .collect()
}
