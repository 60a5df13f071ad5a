// src/modules/router.rs

/// Top-level views reachable once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Chat,
    Upload,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Chat, Route::Upload];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Chat => "/",
            Route::Upload => "/upload",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Chat => "Chat",
            Route::Upload => "Upload",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Route::Chat => 0,
            Route::Upload => 1,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Route::Chat => Route::Upload,
            Route::Upload => Route::Chat,
        }
    }
}
