mod common;

use access_chart::domain::chart::{CellValue, ColumnId, ColumnSpec};
use access_chart::domain::resources::{Day, Timestamp};
use access_chart::infrastructure::InMemoryGateway;
use common::{fixed_clock, jun, project, rid, series, service};
use futures::executor::block_on;
use std::rc::Rc;

#[test]
fn single_add_builds_time_plus_triple() {
    let gateway = Rc::new(InMemoryGateway::new());
    gateway.insert(rid("p1"), Ok(series(&[(jun(2), 150.0), (jun(1), 100.0)])));
    let (svc, _) = service(gateway, fixed_clock());

    block_on(svc.apply_delta(vec![project("p1")], vec![])).unwrap();

    let matrix = svc.matrix();
    assert_eq!(matrix.columns.len(), 4);
    assert!(matches!(matrix.columns[0], ColumnSpec::Time));
    assert_eq!(matrix.metric_offset(&ColumnId::base(&rid("p1"))), Some(1));

    // Rows ascending by day, insertion order of points irrelevant
    let days: Vec<Day> = matrix.rows.iter().map(|r| r.day).collect();
    assert_eq!(days, vec![Day::from(jun(1)), Day::from(jun(2))]);
    assert_eq!(matrix.rows[0].cells[0], Some(CellValue::Count(100.0)));
    assert_eq!(matrix.rows[1].cells[0], Some(CellValue::Count(150.0)));

    assert_eq!(matrix.date_range.start, Timestamp::from_millis(jun(1)));
    assert_eq!(matrix.date_range.end, Timestamp::from_millis(jun(2)));
    assert!(svc.is_active(&rid("p1")));
    assert!(svc.pending_ids().is_empty());
}

#[test]
fn overlapping_resources_pad_missing_days() {
    let gateway = Rc::new(InMemoryGateway::new());
    gateway.insert(rid("p1"), Ok(series(&[(jun(1), 10.0), (jun(2), 20.0)])));
    gateway.insert(rid("p2"), Ok(series(&[(jun(2), 200.0), (jun(3), 300.0)])));
    let (svc, _) = service(gateway, fixed_clock());

    block_on(svc.apply_delta(vec![project("p1"), project("p2")], vec![])).unwrap();

    let matrix = svc.matrix();
    // 1 time column + two triples
    assert_eq!(matrix.columns.len(), 7);
    let days: Vec<Day> = matrix.rows.iter().map(|r| r.day).collect();
    assert_eq!(days, vec![Day::from(jun(1)), Day::from(jun(2)), Day::from(jun(3))]);

    // Every row is fully padded to the column count
    for row in &matrix.rows {
        assert_eq!(row.cells.len(), matrix.columns.len() - 1);
    }

    let p1 = matrix.metric_offset(&ColumnId::base(&rid("p1"))).unwrap() - 1;
    let p2 = matrix.metric_offset(&ColumnId::base(&rid("p2"))).unwrap() - 1;
    // Jun 1: only p1 has data
    assert_eq!(matrix.rows[0].cells[p1], Some(CellValue::Count(10.0)));
    assert_eq!(matrix.rows[0].cells[p2], None);
    // Jun 3: only p2 has data
    assert_eq!(matrix.rows[2].cells[p1], None);
    assert_eq!(matrix.rows[2].cells[p2], Some(CellValue::Count(300.0)));
}

#[test]
fn style_slots_are_sequential_in_add_order() {
    let gateway = Rc::new(InMemoryGateway::new());
    gateway.insert(rid("p1"), Ok(series(&[(jun(1), 1.0)])));
    gateway.insert(rid("p2"), Ok(series(&[(jun(1), 2.0)])));
    let (svc, _) = service(gateway, fixed_clock());

    block_on(svc.apply_delta(vec![project("p1")], vec![])).unwrap();
    block_on(svc.apply_delta(vec![project("p2")], vec![])).unwrap();

    let matrix = svc.matrix();
    let slots: Vec<usize> = matrix
        .columns
        .iter()
        .filter_map(|c| match c {
            ColumnSpec::Metric { style, .. } => Some(style.slot),
            _ => None,
        })
        .collect();
    assert_eq!(slots, vec![0, 1]);
}
