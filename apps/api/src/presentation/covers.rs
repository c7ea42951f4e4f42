use rand::seq::SliceRandom;

/// Cover images served from `/covers`.
pub const INTERVIEW_COVERS: &[&str] = &[
    "/adobe.png",
    "/amazon.png",
    "/facebook.png",
    "/hostinger.png",
    "/pinterest.png",
    "/quora.png",
    "/reddit.png",
    "/skype.png",
    "/spotify.png",
    "/telegram.png",
    "/tiktok.png",
    "/yahoo.png",
];

/// Picks a cover uniformly at random.
pub fn random_interview_cover() -> String {
    let cover = INTERVIEW_COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERVIEW_COVERS[0]);
    format!("/covers{cover}")
}
