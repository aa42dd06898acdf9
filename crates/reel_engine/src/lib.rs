//! Reel engine: remote catalog, paging streams, state containers, the
//! playlist store and one coordinator per screen.
mod api;
mod bootstrap;
mod bridge;
mod client;
mod container;
mod dto;
mod features;
mod fetcher;
mod paging;
mod repository;
mod snapshot_file;
mod store;

pub use api::{CatalogApi, Feed, RemotePage};
pub use bootstrap::{insert_default_playlists, BootstrapReport};
pub use bridge::{spawn_refresh_bridge, spawn_watch_bridge};
pub use client::{CatalogSettings, ReqwestCatalog, DEFAULT_BASE_URL};
pub use container::{Dispatched, IntentContext, StateContainer};
pub use features::{
    MovieDetailsCoordinator, PlaylistCoordinator, SearchCoordinator, SplashCoordinator,
    SplashSettings, UpcomingCoordinator,
};
pub use fetcher::{FeedFetcher, PageFetcher};
pub use paging::PagingStream;
pub use repository::MovieRepository;
pub use snapshot_file::SnapshotFile;
pub use store::{InsertOutcome, MemoryPlaylistStore, PlaylistStore, StorageError};
