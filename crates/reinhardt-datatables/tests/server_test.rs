mod fixtures;

use fixtures::{Env, env, people_table, sample_people};
use reinhardt_datatables::prelude::*;
use reinhardt_datatables::server::{RequestColumn, RequestOrder, Search};
use reinhardt_datatables::{DrawResponse, ServerDataError};
use rstest::*;
use serde_json::json;

fn compile_server_side(env: &Env, table: HtmlTable, filter: FilterSemantics) {
	DataTables::new(table)
		.unwrap()
		.server_side(ServerSide::new(AjaxSource::new("/api/people")).filter(filter))
		.compile(&env.ctx())
		.unwrap();
}

fn names(response: &DrawResponse) -> Vec<String> {
	response
		.data
		.iter()
		.map(|row| row["1"].as_str().unwrap().to_string())
		.collect()
}

#[rstest]
fn test_recompile_replaces_adapter(env: Env, people_table: HtmlTable) {
	compile_server_side(&env, people_table.clone(), FilterSemantics::AnyTermPerRow);
	let lease = env.servers.lease("people").unwrap();

	let grown = people_table.row(TableRow::new(["4", "Dora", "dora@example.com"]));
	compile_server_side(&env, grown, FilterSemantics::AnyTermPerRow);

	assert_eq!(env.servers.len(), 1);
	assert!(matches!(
		env.servers.answer_lease(&lease, &DrawRequest::default()),
		Err(ServerDataError::Stale { table_id, .. }) if table_id == "people"
	));
	let response = env.servers.answer("people", &DrawRequest::default()).unwrap();
	assert_eq!(response.records_total, 4);
}

#[rstest]
fn test_draw_token_is_echoed_and_page_sliced(env: Env, people_table: HtmlTable) {
	compile_server_side(&env, people_table, FilterSemantics::AnyTermPerRow);

	let response = env
		.servers
		.answer(
			"people",
			&DrawRequest {
				draw: 7,
				start: 1,
				length: 1,
				..DrawRequest::default()
			},
		)
		.unwrap();

	assert_eq!(response.draw, 7);
	assert_eq!(response.records_total, 3);
	assert_eq!(response.records_filtered, 3);
	assert_eq!(names(&response), vec!["Bob"]);
}

#[rstest]
fn test_numeric_sort_descending(env: Env, people_table: HtmlTable) {
	let table = people_table.row(TableRow::new(["10", "Zed", "zed@example.com"]));
	compile_server_side(&env, table, FilterSemantics::AnyTermPerRow);

	let response = env
		.servers
		.answer(
			"people",
			&DrawRequest {
				order: vec![RequestOrder {
					column: 0,
					dir: OrderDirection::Desc,
				}],
				..DrawRequest::default()
			},
		)
		.unwrap();

	assert_eq!(names(&response), vec!["Zed", "Charlie", "Bob", "Alice"]);
}

#[rstest]
#[case(FilterSemantics::AnyTermPerRow, "alice bob", vec!["Alice", "Bob"])]
#[case(FilterSemantics::AllTermsPerRow, "alice bob", vec![])]
#[case(FilterSemantics::AllTermsPerRow, "alice example", vec!["Alice"])]
fn test_global_search_semantics(
	env: Env,
	people_table: HtmlTable,
	#[case] filter: FilterSemantics,
	#[case] value: &str,
	#[case] expected: Vec<&str>,
) {
	compile_server_side(&env, people_table, filter);

	let response = env
		.servers
		.answer(
			"people",
			&DrawRequest {
				search: Search::text(value),
				..DrawRequest::default()
			},
		)
		.unwrap();

	assert_eq!(names(&response), expected);
	assert_eq!(response.records_filtered, expected.len());
	assert_eq!(response.records_total, 3);
}

#[rstest]
fn test_search_ignores_markup(env: Env, people_table: HtmlTable) {
	compile_server_side(&env, people_table, FilterSemantics::AnyTermPerRow);

	let response = env
		.servers
		.answer(
			"people",
			&DrawRequest {
				search: Search::text("mailto"),
				..DrawRequest::default()
			},
		)
		.unwrap();

	assert_eq!(response.records_filtered, 0);
}

#[rstest]
fn test_column_search(env: Env, people_table: HtmlTable) {
	compile_server_side(&env, people_table, FilterSemantics::AnyTermPerRow);
	let column = |search: &str| RequestColumn {
		search: Search::text(search),
		..RequestColumn::default()
	};

	let response = env
		.servers
		.answer(
			"people",
			&DrawRequest {
				columns: vec![column(""), column("char"), column("")],
				..DrawRequest::default()
			},
		)
		.unwrap();

	assert_eq!(names(&response), vec!["Charlie"]);
}

#[rstest]
fn test_regex_search(env: Env, people_table: HtmlTable) {
	compile_server_side(&env, people_table, FilterSemantics::AnyTermPerRow);
	let request = |value: &str| DrawRequest {
		search: Search {
			value: value.to_string(),
			regex: true,
		},
		..DrawRequest::default()
	};

	let response = env.servers.answer("people", &request("^b.b$")).unwrap();
	assert_eq!(names(&response), vec!["Bob"]);

	let response = env.servers.answer("people", &request("(unclosed")).unwrap();
	assert_eq!(response.records_filtered, 0);
}

#[rstest]
fn test_answer_posted_json(env: Env) {
	let table = HtmlTable::from_records(
		"posted",
		vec![TableColumn::new("ID"), TableColumn::new("Name")],
		&sample_people(),
		|person| vec![person.id.to_string(), person.name.clone()],
	);
	compile_server_side(&env, table, FilterSemantics::AnyTermPerRow);

	let response = env
		.servers
		.answer_json(
			&json!({
				"draw": 2,
				"start": 0,
				"length": 10,
				"search": {"value": "charlie", "regex": false},
				"order": [],
				"columns": [],
				"object": "posted"
			}),
			&env.settings.object_param,
		)
		.unwrap();

	assert_eq!(
		serde_json::to_value(&response).unwrap(),
		json!({
			"draw": 2,
			"recordsTotal": 3,
			"recordsFiltered": 1,
			"data": [{"0": "3", "1": "Charlie"}]
		})
	);
	assert!(matches!(
		env.servers.answer_json(&json!({"draw": 1, "object": "missing"}), "object"),
		Err(ServerDataError::NotFound(id)) if id == "missing"
	));
}
