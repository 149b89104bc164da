#[cfg(test)]
mod smoke_verifiers {
    use crate::tests::{place, public_inputs};
    use blueprint_algebra::{
        bn254::{BN254Scalar, BN254G1},
        prelude::*,
        secp256k1::SECP256K1G1,
    };
    use blueprint_plonk::component::ComponentParams;
    use blueprint_plonk::components::curves::{UnifiedAddition, UnifiedAdditionInput};
    use blueprint_plonk::components::iterative::{F3Loop, F3LoopInput};
    use blueprint_plonk::constraint_system::checker::verify_assignment;
    use blueprint_plonk::constraint_system::{AssignmentTable, Circuit, ShapeKey};
    use blueprint_plonk::verifiers::{
        BPoly, BPolyInput, GateArgumentInput, GateArgumentVerifier, PermutationInput,
        PermutationProductInput, PermutationVerifier,
    };

    type F = BN254Scalar;

    #[test]
    fn verifier_pieces_in_one_table() {
        let mut prng = test_rng();
        let witness_amount = 15;
        let params = ComponentParams::with_witness_amount(witness_amount);
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(witness_amount, 1, 0);
        let values: Vec<F> = (0..40).map(|_| F::random(&mut prng)).collect();
        let v = public_inputs(&mut table, 0, &values);

        let gates = GateArgumentVerifier::new(params.clone(), &[2, 4]).unwrap();
        let (gate_sum, row) = place(
            &gates,
            &mut circuit,
            &mut table,
            &GateArgumentInput {
                theta: v[0],
                selectors: vec![v[1], v[2]],
                constraints: vec![v[3..6].to_vec(), v[6..11].to_vec()],
            },
            0,
        );

        let permutation = PermutationVerifier::new(params.clone(), 3).unwrap();
        let (argument, row) = place(
            &permutation,
            &mut circuit,
            &mut table,
            &PermutationInput {
                product: PermutationProductInput {
                    beta: v[11],
                    gamma: v[12],
                    f: v[13..16].to_vec(),
                    id: v[16..19].to_vec(),
                    sigma: v[19..22].to_vec(),
                },
                l0: v[22],
                v: v[23],
                v_shifted: v[24],
                q_last: v[25],
                q_blind: v[26],
            },
            row,
        );

        let f3 = F3Loop::new(params.clone(), 3).unwrap();
        let (fri, row) = place(
            &f3,
            &mut circuit,
            &mut table,
            &F3LoopInput {
                s: v[27..30].to_vec(),
                t: v[30..33].to_vec(),
                alphas: v[33..36].to_vec(),
            },
            row,
        );

        let b_poly = BPoly::new(params, 3).unwrap();
        let (b, _) = place(
            &b_poly,
            &mut circuit,
            &mut table,
            &BPolyInput {
                chals: v[36..39].to_vec(),
                x: v[39],
            },
            row,
        );

        verify_assignment(&circuit, &table).unwrap();

        let theta = values[0];
        let horner = |c: &[F]| c.iter().rev().fold(F::zero(), |acc, x| acc * theta + x);
        assert_eq!(
            table.value(&gate_sum.output).unwrap(),
            values[1] * horner(&values[3..6]) + values[2] * horner(&values[6..11])
        );
        let l0 = values[22];
        assert_eq!(table.value(&argument.f0).unwrap(), l0 - l0 * values[23]);
        let expected_fri: F = (0..3)
            .map(|i| (values[27 + i] - values[30 + i]) * values[33 + i])
            .sum();
        assert_eq!(table.value(&fri.output).unwrap(), expected_fri);
        let x = values[39];
        let expected_b = (F::one() + values[38] * x)
            * (F::one() + values[37] * x.square())
            * (F::one() + values[36] * x.square().square());
        assert_eq!(table.value(&b.output).unwrap(), expected_b);
    }

    fn chained_additions<C: CurveGroup>() {
        let mut prng = test_rng();
        let params = ComponentParams::with_witness_amount(6);
        let adder = UnifiedAddition::<C>::new(params).unwrap();
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::new(6, 1, 0);

        // p, then p + p, then 2p + (-p), then p + (-p)
        let p = C::random(&mut prng);
        let coordinates = [p.get_x(), p.get_y(), p.get_x(), -p.get_y()];
        let v = public_inputs(&mut table, 0, &coordinates);
        let point = [v[0], v[1]];
        let negated = [v[2], v[3]];

        let (double, row) = place(
            &adder,
            &mut circuit,
            &mut table,
            &UnifiedAdditionInput { p: point, q: point },
            0,
        );
        let (back, row) = place(
            &adder,
            &mut circuit,
            &mut table,
            &UnifiedAdditionInput {
                p: [double.x, double.y],
                q: negated,
            },
            row,
        );
        let (zero, _) = place(
            &adder,
            &mut circuit,
            &mut table,
            &UnifiedAdditionInput {
                p: [back.x, back.y],
                q: negated,
            },
            row,
        );

        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(circuit.selectors_amount(), 1);
        let read = |x, y| C::new(&table.value(&x).unwrap(), &table.value(&y).unwrap());
        assert_eq!(read(double.x, double.y), p.double());
        assert_eq!(read(back.x, back.y), p);
        assert!(read(zero.x, zero.y).is_identity());
    }

    #[test]
    fn curve_additions() {
        chained_additions::<BN254G1>();
        chained_additions::<SECP256K1G1>();
    }

    #[test]
    fn shape_keys_serialize() {
        let key = ShapeKey::new("gate_argument", &[0, 1, 2, 3], &[], vec![2, 4]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(serde_json::from_str::<ShapeKey>(&json).unwrap(), key);
        let params = ComponentParams::with_witness_amount(7).with_constant_amount(1);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(serde_json::from_str::<ComponentParams>(&json).unwrap(), params);
    }
}
