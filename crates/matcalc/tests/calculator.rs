use matcalc::boundary::{decode, encode, ExternalMatrix};
use matcalc::calculator::{add, calculate, multiply, subtract};
use matcalc::{ErrorKind, MatrixError, Operation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Integer-valued entries keep sums and differences exact.
fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> ExternalMatrix {
    ExternalMatrix::new(
        (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(-1000..=1000) as f64).collect())
            .collect(),
    )
}

#[test]
fn test_add_matches_elementwise_sum() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let (rows, cols) = (rng.gen_range(0..6), rng.gen_range(0..6));
        let a = random_matrix(&mut rng, rows, cols);
        let b = random_matrix(&mut rng, rows, cols);

        let sum = add(&a, &b).unwrap();
        let decoded = decode(&sum).unwrap();
        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(decoded[(i, j)], a.rows()[i][j] + b.rows()[i][j]);
            }
        }
    }
}

#[test]
fn test_add_is_commutative() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let (rows, cols) = (rng.gen_range(1..5), rng.gen_range(1..5));
        let a = random_matrix(&mut rng, rows, cols);
        let b = random_matrix(&mut rng, rows, cols);
        assert_eq!(add(&a, &b).unwrap(), add(&b, &a).unwrap());
    }
}

#[test]
fn test_subtract_then_add_reconstructs() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..20 {
        let (rows, cols) = (rng.gen_range(0..5), rng.gen_range(0..5));
        let a = random_matrix(&mut rng, rows, cols);
        let b = random_matrix(&mut rng, rows, cols);
        let diff = subtract(&a, &b).unwrap();
        let back = add(&diff, &b).unwrap();
        assert_eq!(back, a);
    }
}

#[test]
fn test_round_trip_is_identity() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        let (rows, cols) = (rng.gen_range(1..6), rng.gen_range(0..6));
        let m = random_matrix(&mut rng, rows, cols);
        assert_eq!(encode(&decode(&m).unwrap()).unwrap(), m);
    }
    let empty = ExternalMatrix::default();
    assert_eq!(encode(&decode(&empty).unwrap()).unwrap(), empty);
}

#[test]
fn test_empty_inner_dimension_multiplies_to_zeros() {
    let a = ExternalMatrix::new(vec![vec![], vec![]]);
    let b = ExternalMatrix::default();
    // `b` has zero rows, so it decodes as 0x0 and the product is 2x0.
    assert_eq!(multiply(&a, &b).unwrap(), ExternalMatrix::new(vec![vec![], vec![]]));

    let a = matcalc::math::Matrix::<f64>::new(2, 0, vec![]).unwrap();
    let b = matcalc::math::Matrix::<f64>::new(0, 3, vec![]).unwrap();
    let c = encode(&matcalc::ops::multiply(&a, &b).unwrap()).unwrap();
    assert_eq!(c, ExternalMatrix::from([[0.0; 3]; 2]));
}

#[test]
fn test_concrete_examples() {
    let a = ExternalMatrix::from([[1.0, 2.0], [3.0, 4.0]]);
    let b = ExternalMatrix::from([[5.0, 6.0], [7.0, 8.0]]);
    assert_eq!(
        calculate(Operation::Add, &a, &b).unwrap(),
        ExternalMatrix::from([[6.0, 8.0], [10.0, 12.0]])
    );
    assert_eq!(
        calculate(Operation::Multiply, &a, &b).unwrap(),
        ExternalMatrix::from([[19.0, 22.0], [43.0, 50.0]])
    );
}

#[test]
fn test_shape_violation() {
    let jagged = ExternalMatrix::new(vec![vec![1.0, 2.0], vec![3.0]]);
    match decode(&jagged) {
        Err(MatrixError::Shape { row, .. }) => assert_eq!(row, 1),
        other => panic!("expected shape error, got {:?}", other),
    }
}

#[test]
fn test_dimension_mismatch() {
    init_logging();
    let err = add(
        &ExternalMatrix::from([[1.0, 2.0]]),
        &ExternalMatrix::from([[1.0, 2.0, 3.0]]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);

    let err = multiply(
        &ExternalMatrix::from([[1.0, 2.0]]),
        &ExternalMatrix::from([[1.0, 2.0]]),
    )
    .unwrap_err();
    match err {
        MatrixError::DimensionMismatch { op, lhs, rhs } => {
            assert_eq!(op, Operation::Multiply);
            assert_eq!((lhs.rows, lhs.cols), (1, 2));
            assert_eq!((rhs.rows, rhs.cols), (1, 2));
        }
        other => panic!("expected dimension mismatch, got {:?}", other),
    }
}
