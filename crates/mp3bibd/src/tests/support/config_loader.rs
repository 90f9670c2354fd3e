//! Configuration loaders backed by a temporary music library.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use mp3bib_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader pointing the backend at a temporary library of untagged tracks.
pub(crate) struct TestConfigLoader {
    _root: TempDir,
    library_config: Utf8PathBuf,
}

impl TestConfigLoader {
    /// Creates a library holding `tracks` files named `track01.mp3` onwards.
    pub(crate) fn with_tracks(tracks: usize) -> Self {
        let root = TempDir::new().expect("failed to create temporary library");
        let music = root.path().join("music");
        fs::create_dir_all(&music).expect("failed to create music directory");
        for index in 1..=tracks {
            fs::write(music.join(format!("track{index:02}.mp3")), b"untagged audio")
                .expect("failed to write track");
        }

        let config_path = root.path().join("MusicLibrary.conf");
        let music = music.to_str().expect("temporary path was not valid UTF-8");
        fs::write(&config_path, format!("# test library\n{music}\n"))
            .expect("failed to write library configuration");
        let library_config =
            Utf8PathBuf::from_path_buf(config_path).expect("temporary path was not valid UTF-8");

        Self {
            _root: root,
            library_config,
        }
    }

    /// Points the configuration at a library file that does not exist.
    pub(crate) fn with_missing_library() -> Self {
        let root = TempDir::new().expect("failed to create temporary library");
        let library_config = Utf8PathBuf::from_path_buf(root.path().join("absent.conf"))
            .expect("temporary path was not valid UTF-8");
        Self {
            _root: root,
            library_config,
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            library_config: self.library_config.clone(),
            ..Config::default()
        })
    }
}

/// Loader that fails by passing an unknown CLI flag.
pub(crate) struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("mp3bibd"),
            OsString::from("--no-such-option"),
            OsString::from("value"),
        ];
        Config::load_from_iter(args)
    }
}
