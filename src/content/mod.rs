//! Editing of the site's content files.
//!
//! | Module          | File(s)                        |
//! |-----------------|--------------------------------|
//! | [`nav`]         | `_data/navigation.yml`         |
//! | [`learning`]    | `_pages/learning.md`           |
//! | [`news`]        | `_pages/group-news.md`         |
//! | [`publication`] | `_publications/*.md`           |
//! | [`talk`]        | `_talks/*.md`                  |
//! | [`assets`]      | `files/`, `images/`            |

pub mod assets;
mod collection;
mod error;
pub mod learning;
pub mod nav;
pub mod news;
pub mod publication;
pub mod talk;

pub use error::ContentError;
