use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub age: i32,
}

/// Fields to overwrite on an existing author.
///
/// Empty names and a zero age count as "not supplied" and are skipped, which
/// keeps the behavior existing clients of the catalog rely on.
#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl Record for Author {
    const ENTITY: &'static str = "Author";
    type Draft = NewAuthor;
    type Patch = AuthorPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, draft: NewAuthor) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
        }
    }

    fn apply(&mut self, patch: AuthorPatch) {
        if let Some(name) = patch.name.filter(|name| !name.is_empty()) {
            self.name = name;
        }
        if let Some(age) = patch.age.filter(|age| *age != 0) {
            self.age = age;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub author_id: String,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub genre: String,
    pub author_id: String,
}

/// Fields to overwrite on an existing book. Empty strings are skipped.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub author_id: Option<String>,
}

impl Record for Book {
    const ENTITY: &'static str = "Book";
    type Draft = NewBook;
    type Patch = BookPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, draft: NewBook) -> Self {
        Self {
            id,
            name: draft.name,
            genre: draft.genre,
            author_id: draft.author_id,
        }
    }

    fn apply(&mut self, patch: BookPatch) {
        if let Some(name) = patch.name.filter(|v| !v.is_empty()) {
            self.name = name;
        }
        if let Some(genre) = patch.genre.filter(|v| !v.is_empty()) {
            self.genre = genre;
        }
        if let Some(author_id) = patch.author_id.filter(|v| !v.is_empty()) {
            self.author_id = author_id;
        }
    }
}

struct SeedAuthor {
    id: &'static str,
    name: &'static str,
    age: i32,
}

struct SeedBook {
    id: &'static str,
    name: &'static str,
    genre: &'static str,
    author_id: &'static str,
}

static SEED_AUTHORS: &[SeedAuthor] = &[
    SeedAuthor {
        id: "1",
        name: "J.K. Rowling",
        age: 55,
    },
    SeedAuthor {
        id: "2",
        name: "George R.R. Martin",
        age: 72,
    },
    SeedAuthor {
        id: "3",
        name: "Stephen King",
        age: 73,
    },
];

// Book "6" points at an author that does not exist.
static SEED_BOOKS: &[SeedBook] = &[
    SeedBook {
        id: "1",
        name: "Harry Potter",
        genre: "Fantasy",
        author_id: "1",
    },
    SeedBook {
        id: "2",
        name: "A Game of Thrones",
        genre: "Fantasy",
        author_id: "2",
    },
    SeedBook {
        id: "3",
        name: "The Shining",
        genre: "Horror",
        author_id: "3",
    },
    SeedBook {
        id: "4",
        name: "The Stand",
        genre: "Horror",
        author_id: "3",
    },
    SeedBook {
        id: "5",
        name: "A Clash of Kings",
        genre: "Fantasy",
        author_id: "2",
    },
    SeedBook {
        id: "6",
        name: "web3",
        genre: "Horror",
        author_id: "4",
    },
];

pub fn seed_authors() -> Vec<Author> {
    SEED_AUTHORS
        .iter()
        .map(|a| Author {
            id: a.id.into(),
            name: a.name.into(),
            age: a.age,
        })
        .collect()
}

pub fn seed_books() -> Vec<Book> {
    SEED_BOOKS
        .iter()
        .map(|b| Book {
            id: b.id.into(),
            name: b.name.into(),
            genre: b.genre.into(),
            author_id: b.author_id.into(),
        })
        .collect()
}
