//! Common test fixtures for reinhardt-datatables tests
#![allow(dead_code)]

use reinhardt_datatables::prelude::*;
use rstest::*;

/// Test person data structure for grid tests
#[derive(Debug, Clone, PartialEq)]
pub struct TestPerson {
	pub id: u32,
	pub name: String,
	pub email: String,
	pub born: String,
	pub balance: f64,
}

/// Collaborators of one render cycle
pub struct Env {
	pub assets: AssetRegistry,
	pub servers: ServerDataRegistry,
	pub settings: DataTablesSettings,
}

impl Env {
	pub fn ctx(&self) -> CompileContext<'_> {
		CompileContext::new(&self.assets, &self.servers, &self.settings)
	}
}

/// Fixture providing fresh registries and default settings
#[fixture]
pub fn env() -> Env {
	Env {
		assets: AssetRegistry::new(),
		servers: ServerDataRegistry::new(),
		settings: DataTablesSettings::default(),
	}
}

/// Fixture providing sample people
#[fixture]
pub fn sample_people() -> Vec<TestPerson> {
	vec![
		TestPerson {
			id: 1,
			name: "Alice".to_string(),
			email: "alice@example.com".to_string(),
			born: "1990-04-01".to_string(),
			balance: 120.5,
		},
		TestPerson {
			id: 2,
			name: "Bob".to_string(),
			email: "bob@example.com".to_string(),
			born: "1985-11-23".to_string(),
			balance: 80.0,
		},
		TestPerson {
			id: 3,
			name: "Charlie".to_string(),
			email: "charlie@example.com".to_string(),
			born: "2001-02-14".to_string(),
			balance: 310.25,
		},
	]
}

/// Fixture providing a table of people without date columns
#[fixture]
pub fn people_table(sample_people: Vec<TestPerson>) -> HtmlTable {
	HtmlTable::from_records(
		"people",
		vec![
			TableColumn::new("ID").data_type(DataType::Int),
			TableColumn::new("Name"),
			TableColumn::new("Email"),
		],
		&sample_people,
		|person| {
			vec![
				person.id.to_string(),
				person.name.clone(),
				format!("<a href=\"mailto:{0}\">{0}</a>", person.email),
			]
		},
	)
}

/// Fixture providing a table of people with a hidden email column
#[fixture]
pub fn people_with_hidden_email(sample_people: Vec<TestPerson>) -> HtmlTable {
	HtmlTable::from_records(
		"people",
		vec![
			TableColumn::new("ID").data_type(DataType::Int),
			TableColumn::new("Name"),
			TableColumn::new("Email").visible(false),
		],
		&sample_people,
		|person| vec![person.id.to_string(), person.name.clone(), person.email.clone()],
	)
}

/// Fixture providing a table of people including birth dates and balances
#[fixture]
pub fn people_with_dates(sample_people: Vec<TestPerson>) -> HtmlTable {
	HtmlTable::from_records(
		"people_dates",
		vec![
			TableColumn::new("Name"),
			TableColumn::new("Born").data_type(DataType::Date),
			TableColumn::new("Balance").data_type(DataType::Double),
		],
		&sample_people,
		|person| vec![person.name.clone(), person.born.clone(), format!("{:.2}", person.balance)],
	)
}
