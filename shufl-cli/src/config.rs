use std::{fs::File, path::PathBuf};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use shufl_core::photo::mkdir_if_not_exists;

const APP_NAME: &str = "Shufl";
const CONFIG_FILENAME: &str = "config.json";
const LIBRARY_FILENAME: &str = "library.json";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library_path: Option<PathBuf>,
    pub photo_dir: Option<PathBuf>,
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn data_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.data_dir)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Option<Config> {
        let path = Self::config_path().expect("Failed to get config path");
        if let Ok(file) = File::open(&path) {
            log::info!("loading config: {:?}", &path);
            Some(serde_json::from_reader(file).expect("Failed to read config"))
        } else {
            None
        }
    }

    pub fn save(&self) {
        let dir = Self::config_dir().expect("Failed to get config dir");
        let path = Self::config_path().expect("Failed to get config path");
        mkdir_if_not_exists(&dir).expect("Failed to create config dir");
        let file = File::create(path).expect("Failed to create config");
        serde_json::to_writer_pretty(file, self).expect("Failed to write config");
    }

    pub fn library_path(&self) -> PathBuf {
        self.library_path.clone().unwrap_or_else(|| {
            Self::data_dir()
                .expect("Failed to get data dir")
                .join(LIBRARY_FILENAME)
        })
    }

    pub fn photo_base(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().expect("Failed to get data dir"))
    }
}
