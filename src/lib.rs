//! The library code for the `folio` portfolio site generator. A build has
//! three steps:
//!
//! 1. Loading content: the project list ([`crate::project`]) and the author
//!    profiles ([`crate::author`]), bundled behind [`content::ContentSource`].
//! 2. Assembling pages ([`crate::page`]) from sections: the hero banner
//!    ([`crate::hero`]), the skills grid ([`crate::skills`]), and one project
//!    card ([`crate::card`]) per project.
//! 3. Writing each page through the layout template to disk
//!    ([`crate::write`]) and copying static assets ([`crate::build`]).
//!
//! Sections and pages are rendered with [`gtmpl`] templates; built-in
//! defaults can be overridden per file by a project's theme directory
//! ([`crate::template`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod author;
pub mod build;
pub mod card;
pub mod config;
pub mod content;
pub mod hero;
pub mod page;
pub mod project;
pub mod skills;
pub mod template;
pub mod ticker;
pub mod value;
pub mod write;
