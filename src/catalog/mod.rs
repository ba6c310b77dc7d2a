//! Reference table storage and indexing.
//!
//! The reference table maps each supported species to its known conditions,
//! each with a defining symptom signature and an urgency tier. A default table
//! is compiled into the binary (and validated by `build.rs`), but alternative
//! tables can also be loaded from JSON files.
//!
//! ## Embedded Table
//!
//! - **Dog**: 消化不良, 犬瘟热, 犬细小病毒, 皮肤病
//! - **Cat**: 毛球症, 猫瘟, 猫鼻支, 尿路感染
//!
//! Rabbits, hamsters and other species have no table; the matching engine
//! reports that explicitly instead of failing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pet_triage::ReferenceStore;
//! use pet_triage::core::types::Species;
//!
//! let store = ReferenceStore::load_embedded().unwrap();
//!
//! for condition in store.conditions_for(Species::Dog).unwrap() {
//!     println!("{} ({})", condition.name, condition.urgency);
//! }
//! ```
//!
//! ## Custom Tables
//!
//! ```rust,no_run
//! use pet_triage::ReferenceStore;
//! use std::path::Path;
//!
//! let store = ReferenceStore::load_embedded().unwrap();
//! let json = store.to_json().unwrap();
//!
//! let custom = ReferenceStore::load_from_file(Path::new("my_table.json")).unwrap();
//! ```

pub mod index;
pub mod store;
