//! Property tests for the partial-merge rule and the completed-record sweep.

use proptest::prelude::*;
use tasktable::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
}

async fn create_todo(
    service: &TodoService<MemoryTable<TodoRecord>>,
    description: String,
) -> TodoRecord {
    let response = service
        .create(CreateTodo {
            task_description: Some(description),
        })
        .await
        .unwrap();
    let Some(ResponseBody::Record(record)) = response.result else {
        panic!("create should return the created record");
    };
    record
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// An update overwrites the completion flag unconditionally and replaces
    /// the description only when the incoming value is non-empty.
    #[test]
    fn update_follows_the_partial_merge_rule(
        original in "[a-z]{1,12}",
        incoming in proptest::option::of("[a-z]{0,8}"),
        completed in any::<bool>(),
    ) {
        runtime().block_on(async {
            let table = MemoryTable::new();
            let service = TodoService::new(table.clone());
            let record = create_todo(&service, original.clone()).await;

            service
                .update(
                    record.row_key,
                    UpdateTodo {
                        task_description: incoming.clone(),
                        is_completed: completed,
                    },
                )
                .await
                .unwrap();

            let stored = table
                .retrieve(TODO_PARTITION, &record.row_key.to_string())
                .await
                .unwrap()
                .unwrap();

            let expected = match &incoming {
                Some(text) if !text.is_empty() => text.clone(),
                _ => original.clone(),
            };
            assert_eq!(stored.record.task_description, expected);
            assert_eq!(stored.record.is_completed, completed);
            assert!(
                !stored.record.task_description.is_empty(),
                "a stored description never becomes empty"
            );
        });
    }

    /// The sweep removes every completed record and nothing else, for any
    /// partition contents including none.
    #[test]
    fn sweep_removes_exactly_the_completed_records(
        tasks in proptest::collection::vec(("[a-z]{1,12}", any::<bool>()), 0..16),
    ) {
        runtime().block_on(async {
            let table = MemoryTable::new();
            let service = TodoService::new(table.clone());

            let mut survivors = Vec::new();
            for (description, completed) in &tasks {
                let record = create_todo(&service, description.clone()).await;
                if *completed {
                    service
                        .update(
                            record.row_key,
                            UpdateTodo {
                                task_description: None,
                                is_completed: true,
                            },
                        )
                        .await
                        .unwrap();
                } else {
                    survivors.push(record.row_key);
                }
            }

            let removed = service.delete_where_completed().await.unwrap();
            let completed_count = tasks.iter().filter(|(_, completed)| *completed).count();
            assert_eq!(removed, completed_count);
            assert_eq!(table.len(), survivors.len());
            for id in survivors {
                let response = service.get_by_id(id).await.unwrap();
                assert!(response.success, "incomplete records must survive the sweep");
            }
        });
    }
}
