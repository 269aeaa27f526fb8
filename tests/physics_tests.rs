use loadforge::geometry::Rect;
use loadforge::instances::{Container, Instance, Item};
use loadforge::placement::{decode, Gene};
use loadforge::scorer::physics::{bounds_area, center_of_mass, com_offset, overlap_area, safe_zone};
use rstest::rstest;

fn square(id: u32, side: f64, weight: f64) -> Item {
    Item {
        id,
        width: side,
        depth: side,
        weight,
        rotatable: false,
    }
}

fn ten_by_ten(items: Vec<Item>) -> Instance {
    Instance {
        name: "physics".to_string(),
        category: Default::default(),
        container: Container {
            width: 10.0,
            depth: 10.0,
            max_weight: 100.0,
        },
        items,
    }
}

#[rstest]
#[case::disjoint(0.0, 0.0, 5.0, 5.0, 0.0)]
#[case::touching_edge(0.0, 0.0, 2.0, 0.0, 0.0)]
#[case::touching_corner(0.0, 0.0, 2.0, 2.0, 0.0)]
#[case::quarter(0.0, 0.0, 1.0, 1.0, 1.0)]
#[case::half(0.0, 0.0, 1.0, 0.0, 2.0)]
#[case::identical(3.0, 3.0, 3.0, 3.0, 4.0)]
fn test_pair_overlap(#[case] x1: f64, #[case] y1: f64, #[case] x2: f64, #[case] y2: f64, #[case] expected: f64) {
    let inst = ten_by_ten(vec![square(1, 2.0, 1.0), square(2, 2.0, 1.0)]);
    let p = decode(&inst, &[Gene::new(x1, y1, false), Gene::new(x2, y2, false)]);
    assert_eq!(overlap_area(&p), expected);
}

#[test]
fn test_overlap_sums_over_pairs() {
    // three stacked squares: every pair overlaps fully
    let inst = ten_by_ten(vec![square(1, 2.0, 1.0), square(2, 2.0, 1.0), square(3, 2.0, 1.0)]);
    let g = vec![Gene::new(1.0, 1.0, false); 3];
    assert_eq!(overlap_area(&decode(&inst, &g)), 12.0);
}

#[rstest]
#[case::inside(4.0, 4.0, 0.0)]
#[case::flush_corner(8.0, 8.0, 0.0)]
#[case::half_left(-1.0, 4.0, 2.0)]
#[case::corner_poke(9.0, 9.0, 3.0)]
#[case::far_away(50.0, 50.0, 4.0)]
fn test_bounds_area(#[case] x: f64, #[case] y: f64, #[case] expected: f64) {
    let inst = ten_by_ten(vec![square(1, 2.0, 1.0)]);
    let p = decode(&inst, &[Gene::new(x, y, false)]);
    assert_eq!(bounds_area(&p, &inst.container), expected);
}

#[test]
fn test_center_of_mass_is_weighted() {
    let inst = ten_by_ten(vec![square(1, 2.0, 30.0), square(2, 2.0, 10.0)]);
    // centers (1,1) and (9,1)
    let p = decode(&inst, &[Gene::new(0.0, 0.0, false), Gene::new(8.0, 0.0, false)]);
    let (x, y) = center_of_mass(&p).unwrap();
    assert!((x - 3.0).abs() < 1e-12);
    assert!((y - 1.0).abs() < 1e-12);
}

#[test]
fn test_weightless_placement_has_no_center() {
    let inst = ten_by_ten(vec![square(1, 2.0, 0.0)]);
    let p = decode(&inst, &[Gene::new(0.0, 0.0, false)]);
    assert!(center_of_mass(&p).is_none());
}

#[test]
fn test_safe_zone_geometry() {
    let c = Container {
        width: 10.0,
        depth: 20.0,
        max_weight: 0.0,
    };
    let zone = safe_zone(&c, 0.3);
    assert_eq!(zone, Rect { x0: 2.0, y0: 4.0, x1: 8.0, y1: 16.0 });
    let exact = safe_zone(&c, 0.0);
    assert_eq!(exact.area(), 0.0);
}

#[rstest]
#[case::center(5.0, 5.0, 0.3, 0.0)]
#[case::inside_zone(7.5, 2.5, 0.3, 0.0)]
#[case::left_of_zone(1.0, 5.0, 0.3, 1.0)]
#[case::diagonal(0.0, 0.0, 0.3, 8.0f64.sqrt())]
#[case::exact_center_mode(8.0, 9.0, 0.0, 5.0)]
fn test_com_offset(#[case] x: f64, #[case] y: f64, #[case] tol: f64, #[case] expected: f64) {
    let c = Container {
        width: 10.0,
        depth: 10.0,
        max_weight: 0.0,
    };
    assert!((com_offset((x, y), &c, tol) - expected).abs() < 1e-12);
}
