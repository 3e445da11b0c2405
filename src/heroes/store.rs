use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::HeroError;
use super::hero::{Hero, mock_heroes};
use super::matching::MatchMode;
use crate::messages::MessageLog;

/// First id handed out when the roster is empty.
const FIRST_ID: u32 = 11;

/// In-memory hero roster with request/response CRUD and name search.
///
/// Clones share the same roster and message log.
#[derive(Debug, Clone)]
pub struct HeroStore {
	heroes: Arc<RwLock<Vec<Hero>>>,
	messages: MessageLog,
}

impl HeroStore {
	pub fn new(heroes: Vec<Hero>, messages: MessageLog) -> Self {
		Self {
			heroes: Arc::new(RwLock::new(heroes)),
			messages,
		}
	}

	/// Store seeded with [`mock_heroes`].
	pub fn with_mock_heroes(messages: MessageLog) -> Self {
		Self::new(mock_heroes(), messages)
	}

	#[must_use]
	pub fn messages(&self) -> &MessageLog {
		&self.messages
	}

	fn read(&self) -> RwLockReadGuard<'_, Vec<Hero>> {
		self.heroes.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, Vec<Hero>> {
		self.heroes.write().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn heroes(&self) -> Vec<Hero> {
		self.messages.add("HeroService: fetched heroes");
		self.read().clone()
	}

	/// The dashboard selection: the second through fifth heroes.
	pub fn top_heroes(&self) -> Vec<Hero> {
		let heroes = self.heroes();
		heroes.into_iter().skip(1).take(4).collect()
	}

	pub fn hero(&self, id: u32) -> Result<Hero, HeroError> {
		let found = self.read().iter().find(|hero| hero.id == id).cloned();
		match found {
			Some(hero) => {
				self.messages.add(format!("HeroService: fetched hero id={id}"));
				Ok(hero)
			}
			None => {
				let err = HeroError::NotFound { id };
				self.messages.add(format!("HeroService: hero failed: {err}"));
				Err(err)
			}
		}
	}

	/// Add a hero under the next free id.
	pub fn add(&self, name: &str) -> Result<Hero, HeroError> {
		let name = name.trim();
		if name.is_empty() {
			return Err(HeroError::InvalidName);
		}

		let hero = {
			let mut heroes = self.write();
			let id = heroes
				.iter()
				.map(|hero| hero.id)
				.max()
				.map_or(FIRST_ID, |max| max + 1);
			let hero = Hero::new(id, name);
			heroes.push(hero.clone());
			hero
		};
		self.messages
			.add(format!("HeroService: added hero w/ id={}", hero.id));
		Ok(hero)
	}

	pub fn update(&self, hero: Hero) -> Result<(), HeroError> {
		if hero.name.trim().is_empty() {
			return Err(HeroError::InvalidName);
		}

		let id = hero.id;
		{
			let mut heroes = self.write();
			let slot = heroes
				.iter_mut()
				.find(|existing| existing.id == id)
				.ok_or(HeroError::NotFound { id })?;
			*slot = hero;
		}
		self.messages.add(format!("HeroService: updated hero id={id}"));
		Ok(())
	}

	pub fn delete(&self, id: u32) -> Result<Hero, HeroError> {
		let removed = {
			let mut heroes = self.write();
			let position = heroes
				.iter()
				.position(|hero| hero.id == id)
				.ok_or(HeroError::NotFound { id })?;
			heroes.remove(position)
		};
		self.messages.add(format!("HeroService: deleted hero id={id}"));
		Ok(removed)
	}

	/// Heroes whose names match `term`. A blank term matches nothing.
	pub fn search(&self, term: &str, mode: MatchMode) -> Vec<Hero> {
		if term.trim().is_empty() {
			return Vec::new();
		}

		let found = mode.matches(&self.read(), term);
		if found.is_empty() {
			self.messages
				.add(format!("HeroService: no heroes matching \"{term}\""));
		} else {
			self.messages
				.add(format!("HeroService: found heroes matching \"{term}\""));
		}
		found
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> HeroStore {
		HeroStore::with_mock_heroes(MessageLog::new())
	}

	#[test]
	fn top_heroes_skip_the_first_entry() {
		let names: Vec<String> = store()
			.top_heroes()
			.into_iter()
			.map(|hero| hero.name)
			.collect();
		assert_eq!(names, vec!["Bombasto", "Celeritas", "Magneta", "RubberMan"]);
	}

	#[test]
	fn missing_hero_is_reported() {
		let store = store();
		let err = store.hero(99).unwrap_err();
		assert!(matches!(err, HeroError::NotFound { id: 99 }));
		assert_eq!(
			store.messages().messages(),
			vec!["HeroService: hero failed: hero id=99 not found"]
		);
	}

	#[test]
	fn added_heroes_take_the_next_id() {
		let store = store();
		let hero = store.add("  Windstorm ").expect("valid name");
		assert_eq!(hero, Hero::new(21, "Windstorm"));
		assert_eq!(store.hero(21).expect("added"), hero);

		let empty = HeroStore::new(Vec::new(), MessageLog::new());
		assert_eq!(empty.add("First").expect("valid name").id, FIRST_ID);
	}

	#[test]
	fn blank_names_are_rejected() {
		let store = store();
		assert!(matches!(store.add("   "), Err(HeroError::InvalidName)));
		assert!(matches!(
			store.update(Hero::new(12, "")),
			Err(HeroError::InvalidName)
		));
	}

	#[test]
	fn update_and_delete_modify_the_roster() {
		let store = store();
		store
			.update(Hero::new(12, "Dr. Nicer"))
			.expect("hero exists");
		assert_eq!(store.hero(12).expect("hero exists").name, "Dr. Nicer");

		let removed = store.delete(12).expect("hero exists");
		assert_eq!(removed.name, "Dr. Nicer");
		assert!(store.hero(12).is_err());
		assert!(matches!(
			store.delete(12),
			Err(HeroError::NotFound { id: 12 })
		));
	}

	#[test]
	fn search_logs_hits_and_misses() {
		let store = store();
		let found = store.search("ma", MatchMode::Substring);
		assert_eq!(found.len(), 4);
		assert!(store.search("zzz", MatchMode::Substring).is_empty());

		assert_eq!(
			store.messages().messages(),
			vec![
				"HeroService: found heroes matching \"ma\"",
				"HeroService: no heroes matching \"zzz\"",
			]
		);
	}

	#[test]
	fn blank_search_returns_nothing_silently() {
		let store = store();
		assert!(store.search("  ", MatchMode::Substring).is_empty());
		assert!(store.messages().is_empty());
	}
}
