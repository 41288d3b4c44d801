//! Roster - arena of living persons with an id index
//!
//! Persons live in a `Vec` in storage order. An id -> slot map is kept in
//! step with every append and rebuilt whenever the arena is compacted.

use ahash::AHashMap;

use crate::core::types::{Gender, PersonId};
use crate::entity::person::Person;
use crate::genetics::Genome;

#[derive(Debug, Clone)]
pub struct Roster {
    people: Vec<Person>,
    index: AHashMap<PersonId, usize>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            people: Vec::new(),
            index: AHashMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get(&self, slot: usize) -> Option<&Person> {
        self.people.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Person> {
        self.people.get_mut(slot)
    }

    /// Storage slot of a living person
    pub fn find(&self, id: PersonId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Id the next created person will receive
    pub fn peek_next_id(&self) -> PersonId {
        PersonId(self.next_id)
    }

    /// Hand out the next id. Never reused, never reset by `clear`.
    pub fn allocate_id(&mut self) -> PersonId {
        let id = PersonId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a person, returning its slot
    pub fn push(&mut self, person: Person) -> usize {
        let slot = self.people.len();
        self.index.insert(person.id, slot);
        self.people.push(person);
        slot
    }

    /// Create and append an unmarried newborn
    pub fn spawn_newborn(&mut self, genome: Genome, gender: Gender) -> PersonId {
        let id = self.allocate_id();
        self.push(Person::newborn(id, genome, gender));
        id
    }

    /// Mutable access to two distinct slots at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Person, &mut Person) {
        debug_assert_ne!(a, b, "pair_mut needs distinct slots");
        if a < b {
            let (left, right) = self.people.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.people.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Drop everyone; the id sequence keeps counting
    pub fn clear(&mut self) {
        self.people.clear();
        self.index.clear();
    }

    /// Take the current arena out, leaving the roster empty
    pub fn take(&mut self) -> Vec<Person> {
        self.index.clear();
        std::mem::take(&mut self.people)
    }

    /// Install a compacted arena and rebuild the index
    pub fn replace(&mut self, people: Vec<Person>) {
        self.index = people
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id, slot))
            .collect();
        self.people = people;
    }

    /// Mean age of everyone present, 0.0 when empty
    pub fn mean_age(&self) -> f64 {
        if self.people.is_empty() {
            return 0.0;
        }
        let total: f64 = self.people.iter().map(|p| p.age as f64).sum();
        total / self.people.len() as f64
    }

    pub fn married_count(&self) -> usize {
        self.people.iter().filter(|p| p.is_married()).count()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(roster: &mut Roster, gender: Gender) -> PersonId {
        roster.spawn_newborn(Genome::default(), gender)
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut roster = Roster::new();
        let a = spawn(&mut roster, Gender::Female);
        let b = spawn(&mut roster, Gender::Male);
        assert_eq!(a, PersonId(1));
        assert_eq!(b, PersonId(2));
        assert_eq!(roster.peek_next_id(), PersonId(3));
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let mut roster = Roster::new();
        spawn(&mut roster, Gender::Female);
        roster.clear();
        assert!(roster.is_empty());
        assert_eq!(spawn(&mut roster, Gender::Male), PersonId(2));
    }

    #[test]
    fn test_find_after_replace() {
        let mut roster = Roster::new();
        let ids: Vec<_> = (0..5).map(|_| spawn(&mut roster, Gender::Female)).collect();
        let survivors: Vec<Person> = roster
            .take()
            .into_iter()
            .filter(|p| p.id != ids[1])
            .collect();
        roster.replace(survivors);

        assert_eq!(roster.find(ids[1]), None);
        assert_eq!(roster.find(ids[0]), Some(0));
        assert_eq!(roster.find(ids[2]), Some(1));
        assert_eq!(roster.find(ids[4]), Some(3));
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut roster = Roster::new();
        let a = spawn(&mut roster, Gender::Female);
        let b = spawn(&mut roster, Gender::Male);
        {
            let (x, y) = roster.pair_mut(1, 0);
            assert_eq!(x.id, b);
            assert_eq!(y.id, a);
        }
        let (x, y) = roster.pair_mut(0, 1);
        x.marry(b);
        y.marry(a);
        assert_eq!(roster.married_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_pair_mut_same_slot_panics() {
        let mut roster = Roster::new();
        spawn(&mut roster, Gender::Female);
        let _ = roster.pair_mut(0, 0);
    }

    #[test]
    fn test_mean_age() {
        let mut roster = Roster::new();
        assert_eq!(roster.mean_age(), 0.0);
        spawn(&mut roster, Gender::Female);
        spawn(&mut roster, Gender::Male);
        if let Some(p) = roster.get_mut(1) {
            p.age = 10;
        }
        assert!((roster.mean_age() - 5.0).abs() < 1e-12);
    }
}
