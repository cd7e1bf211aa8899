// Library root
// -----------
// The binary (`main.rs`) wires these modules together into the interactive
// Wikipedia reader.
//
// Module responsibilities:
// - `api`: HTTP calls to the MediaWiki API (search, page by title, random
//   page) and the `ArticleSource` trait the menu talks to.
// - `config`: settings resolved from the environment.
// - `display`: banner + word-wrapped rendering of an article.
// - `error`: classified failures of a single API call.
// - `ui`: the menu loop and the input prompts.
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod ui;
