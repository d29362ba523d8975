use std::collections::HashMap;
use std::hash::Hash;

/// Dense index of a city inside the planner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityKey(usize);

impl CityKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CityKey {
    fn from(value: usize) -> Self {
        CityKey(value)
    }
}

/// Stable key interner for host cities.
#[derive(Debug, Clone)]
pub struct CityInterner<C>
where
    C: Clone + Eq + Hash,
{
    cities: Vec<C>,
    city_to_key: HashMap<C, CityKey>,
}

impl<C> Default for CityInterner<C>
where
    C: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self {
            cities: Vec::new(),
            city_to_key: HashMap::new(),
        }
    }
}

impl<C> CityInterner<C>
where
    C: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the city if needed and return its dense key.
    pub fn intern(&mut self, city: C) -> CityKey {
        if let Some(key) = self.city_to_key.get(&city) {
            return *key;
        }

        let key = CityKey::from(self.cities.len());
        self.cities.push(city.clone());
        self.city_to_key.insert(city, key);
        key
    }

    pub fn get(&self, key: CityKey) -> Option<&C> {
        self.cities.get(key.index())
    }

    pub fn key_of(&self, city: &C) -> Option<CityKey> {
        self.city_to_key.get(city).copied()
    }

    /// Iterate `(key, city)` in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (CityKey, &C)> + '_ {
        self.cities
            .iter()
            .enumerate()
            .map(|(i, c)| (CityKey::from(i), c))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
