//! Audio: gremlin sound cues played on an SFX channel via an observer.

use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;
use micromegas_tracing::prelude::*;

use crate::events::SoundCue;

#[derive(Resource)]
pub struct SfxChannel;

/// Sound effects for every `SoundCue`.
/// Load it with `init_collection` or a `LoadingState`; until it exists,
/// cues are dropped silently.
#[derive(AssetCollection, Resource)]
pub struct GremlinAudioAssets {
    #[asset(path = "audio/sfx/footstep.ogg")]
    pub footstep: Handle<AudioSource>,
    #[asset(path = "audio/sfx/gremlin_hurt.ogg")]
    pub gremlin_hurt: Handle<AudioSource>,
    #[asset(path = "audio/sfx/player_hurt.ogg")]
    pub player_hurt: Handle<AudioSource>,
    #[asset(path = "audio/sfx/torch_extinguished.ogg")]
    pub torch_extinguished: Handle<AudioSource>,
}

impl GremlinAudioAssets {
    pub fn handle_for(&self, cue: SoundCue) -> &Handle<AudioSource> {
        match cue {
            SoundCue::Footstep => &self.footstep,
            SoundCue::GremlinHurt => &self.gremlin_hurt,
            SoundCue::PlayerHurt => &self.player_hurt,
            SoundCue::TorchExtinguished => &self.torch_extinguished,
        }
    }
}

/// Opt-in: needs `bevy_kira_audio::AudioPlugin` and a sound device.
pub struct GremlinAudioPlugin;

impl Plugin for GremlinAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_channel::<SfxChannel>();
        app.add_observer(on_sound_cue);
    }
}

#[span_fn]
fn on_sound_cue(
    trigger: On<SoundCue>,
    sfx: Res<AudioChannel<SfxChannel>>,
    assets: Option<Res<GremlinAudioAssets>>,
) {
    let Some(assets) = assets else {
        return;
    };
    sfx.play(assets.handle_for(*trigger.event()).clone());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
