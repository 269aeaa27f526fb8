use loadforge::config::{BaselineParams, FitnessWeights};
use loadforge::instances::{Container, Instance, Item};
use loadforge::optimizer::{local_search, BestSolution, NullMonitor, SolveContext};
use loadforge::placement::{decode, Gene};
use loadforge::scorer::{physics, Scorer};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_item(id: u32)(
        width in 0.5..5.0f64,
        depth in 0.5..5.0f64,
        weight in 0.0..100.0f64,
        rotatable in any::<bool>()
    ) -> Item {
        Item { id, width, depth, weight, rotatable }
    }
}

prop_compose! {
    fn arb_instance()(
        width in 4.0..30.0f64,
        depth in 4.0..30.0f64,
        max_weight in 0.0..500.0f64,
        n in 1usize..10
    )(
        items in (0..n as u32).map(arb_item).collect::<Vec<_>>(),
        width in Just(width),
        depth in Just(depth),
        max_weight in Just(max_weight)
    ) -> Instance {
        Instance {
            name: "prop".to_string(),
            category: Default::default(),
            container: Container { width, depth, max_weight },
            items,
        }
    }
}

fn arb_gene() -> impl Strategy<Value = Gene> {
    (-40.0..40.0f64, -40.0..40.0f64, any::<bool>()).prop_map(|(x, y, r)| Gene::new(x, y, r))
}

prop_compose! {
    fn arb_weights()(
        overlap in 0.0..5000.0f64,
        bounds in 0.0..5000.0f64,
        weight in 0.0..100.0f64,
        balance in 0.0..500.0f64,
        tol in 0.0..0.5f64
    ) -> FitnessWeights {
        FitnessWeights {
            penalty_overlap: overlap,
            penalty_bounds: bounds,
            penalty_weight: weight,
            penalty_balance: balance,
            balance_tolerance: tol,
        }
    }
}

fn instance_and_genes() -> impl Strategy<Value = (Instance, Vec<Gene>)> {
    arb_instance().prop_flat_map(|inst| {
        let n = inst.items.len();
        (Just(inst), proptest::collection::vec(arb_gene(), n))
    })
}

proptest! {
    #[test]
    fn prop_fitness_is_finite_and_non_negative(
        (inst, genes) in instance_and_genes(),
        weights in arb_weights()
    ) {
        let r = Scorer::new(inst, weights).score(&genes).1;
        prop_assert!(r.total.is_finite());
        prop_assert!(r.total >= 0.0);
        prop_assert!(r.overlap_area >= 0.0 && r.bounds_area >= 0.0 && r.com_offset >= 0.0);
    }

    #[test]
    fn prop_decode_keeps_item_order_and_rotation_rules(
        (inst, genes) in instance_and_genes()
    ) {
        let p = decode(&inst, &genes);
        prop_assert_eq!(p.len(), inst.items.len());
        for ((item, gene), placed) in inst.items.iter().zip(&genes).zip(&p.items) {
            prop_assert_eq!(placed.item_id, item.id);
            prop_assert_eq!(placed.rotated, gene.rotated && item.rotatable);
            prop_assert_eq!(placed.rect.x0, gene.x);
            prop_assert_eq!(placed.rect.y0, gene.y);
        }
        prop_assert_eq!(decode(&inst, &genes), p);
    }

    #[test]
    fn prop_overlap_ignores_item_order(
        (inst, genes) in instance_and_genes()
    ) {
        let forward = physics::overlap_area(&decode(&inst, &genes));
        let mut rev_inst = inst.clone();
        rev_inst.items.reverse();
        let rev_genes: Vec<Gene> = genes.iter().rev().copied().collect();
        let backward = physics::overlap_area(&decode(&rev_inst, &rev_genes));
        prop_assert!((forward - backward).abs() <= 1e-9 * (1.0 + forward));
    }

    #[test]
    fn prop_infeasible_pays_at_least_the_floor(
        (inst, genes) in instance_and_genes(),
        weights in arb_weights()
    ) {
        let half_diag = inst.container.half_diagonal();
        let r = Scorer::new(inst, weights.clone()).score(&genes).1;
        let cap = weights.penalty_balance * half_diag;
        if r.is_feasible() {
            // every feasible balance penalty stays under the floor
            prop_assert!(r.balance_penalty <= cap + 1e-9);
            prop_assert_eq!(r.feasibility_floor, 0.0);
        } else {
            prop_assert!((r.feasibility_floor - cap).abs() <= 1e-9 * (1.0 + cap));
            prop_assert!(r.total + 1e-9 >= r.feasibility_floor + r.weight_penalty);
        }
    }

    #[test]
    fn prop_local_search_never_worsens(
        (inst, genes) in instance_and_genes(),
        seed in any::<u64>()
    ) {
        let scorer = Scorer::new(inst, FitnessWeights::default());
        let start = BestSolution::from_genotype(&scorer, genes);
        let before = start.fitness();
        let params = BaselineParams { local_search_iterations: 100, ..Default::default() };

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut monitor = NullMonitor;
        let mut ctx = SolveContext::new(&scorer, &mut rng, &mut monitor);
        let after = local_search::improve(&mut ctx, start, &params);
        prop_assert!(after.fitness() <= before);
    }
}
