use std::{
    cmp::Ordering,
    fmt,
};

use skipset::SkipList;

/// People are keyed by age alone, so two people of the same age are the same
/// entry as far as the set is concerned.
#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn new(name: &str, age: u32) -> Self {
        Person {
            name: name.to_string(),
            age,
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.age == other.age
    }
}

impl Eq for Person {}

impl PartialOrd for Person {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Person {
    fn cmp(&self, other: &Self) -> Ordering {
        self.age.cmp(&other.age)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}

fn main() {
    let mut people = SkipList::new();
    people.insert(Person::new("Alice", 30));
    people.insert(Person::new("Bob", 25));
    people.insert(Person::new("Charlie", 35));

    let (existing, added) = people.insert(Person::new("David", 25));
    if !added {
        if let Some(person) = existing.get() {
            println!("David was not added, {} already holds age 25", person);
        }
    }

    println!("People in order of age:");
    for person in &people {
        println!("  {}", person);
    }

    match people.get(&Person::new("Unknown", 25)) {
        | Some(person) => println!("Found person with age 25: {}", person),
        | None => println!("No person found with age 25."),
    }

    let probe = Person::new("", 31);
    match people.lower_bound(&probe).get() {
        | Some(person) => println!("First person aged 31 or older: {}", person),
        | None => println!("Nobody is 31 or older."),
    }
}
