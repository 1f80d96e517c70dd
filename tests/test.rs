use apgsynth::{
    analyse_object, canonise, canonise_synthesis, cmp_repr, decode, encode_orientation,
    find_syntheses, parse_paths, remove_gliders, rules::LifeHistory, synthesis_cost, Config,
    DecodeProfile, Edge, Heading, LaneRecord, ObjectAnalysis, Outcome, Pattern, PlaceMode, Rect,
    Salvo, Transform, World,
};
use std::cmp::Ordering;

fn pattern(cells: &[(i32, i32)]) -> Pattern {
    cells.iter().collect()
}

fn block() -> Pattern {
    pattern(&[(0, 0), (1, 0), (0, 1), (1, 1)])
}

fn blinker() -> Pattern {
    pattern(&[(0, 0), (1, 0), (2, 0)])
}

fn r_pentomino() -> Pattern {
    pattern(&[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
}

#[test]
fn empty_pattern_encodes_to_zero() -> Result<(), apgsynth::Error> {
    let canonised = canonise(&Pattern::new(), 1)?;
    assert_eq!(canonised.code, "0");
    assert_eq!(canonised.phase, 0);
    assert_eq!(canonised.frames.len(), 1);
    Ok(())
}

#[test]
fn single_cell_code() -> Result<(), apgsynth::Error> {
    let canonised = canonise(&pattern(&[(0, 0)]), 1)?;
    assert_eq!(canonised.code, "xs1_1");
    Ok(())
}

#[test]
fn block_code() -> Result<(), apgsynth::Error> {
    assert_eq!(canonise(&block(), 1)?.code, "xs4_33");
    // The code does not depend on where the block sits.
    assert_eq!(canonise(&block().translate(17, -4), 1)?.code, "xs4_33");
    Ok(())
}

#[test]
fn blinker_prefers_latest_tying_phase() -> Result<(), apgsynth::Error> {
    let canonised = canonise(&blinker(), 2)?;
    assert_eq!(canonised.code, "xp2_7");
    // The single-column representation recurs in both phases; the later
    // one wins and contributes all four frames realising it.
    assert_eq!(canonised.phase, 1);
    assert_eq!(canonised.frames.len(), 4);
    Ok(())
}

#[test]
fn zero_run_compression() -> Result<(), apgsynth::Error> {
    // Two cells separated by a long, a medium and a short gap, scanned
    // through the plain row-major frame.
    let far = pattern(&[(0, 0), (9, 0)]);
    let frame = far.bounding_box().unwrap().frames()[0];
    assert_eq!(encode_orientation(&far, &frame)?, "1y41");

    let mid = pattern(&[(0, 0), (4, 0)]);
    let frame = mid.bounding_box().unwrap().frames()[0];
    assert_eq!(encode_orientation(&mid, &frame)?, "1x1");

    let near = pattern(&[(0, 0), (3, 0)]);
    let frame = near.bounding_box().unwrap().frames()[0];
    assert_eq!(encode_orientation(&near, &frame)?, "1w1");
    Ok(())
}

#[test]
fn band_separator() -> Result<(), apgsynth::Error> {
    // A column of 7 cells spans two 5-row bands.
    let column: Pattern = (0..7).map(|y| (0, y)).collect();
    assert_eq!(canonise(&column, 1)?.code, "xs7_vz3");
    let decoded = decode("xs7_vz3", DecodeProfile::Extended)?;
    assert_eq!(decoded, column);
    Ok(())
}

#[test]
fn representation_ordering() {
    assert_eq!(cmp_repr("#", "#"), Ordering::Equal);
    assert_eq!(cmp_repr("#", "0"), Ordering::Greater);
    assert_eq!(cmp_repr("0", "#"), Ordering::Less);
    // Shorter always beats longer, regardless of content.
    assert_eq!(cmp_repr("zz", "111"), Ordering::Less);
    assert_eq!(cmp_repr("ab", "ba"), Ordering::Less);
    assert_eq!(cmp_repr("33", "33"), Ordering::Equal);
}

#[test]
fn round_trip_through_decode() -> Result<(), apgsynth::Error> {
    for cells in [block(), blinker(), r_pentomino()].iter() {
        let code = canonise(cells, 1)?.code;
        let decoded = decode(&code, DecodeProfile::Extended)?;
        assert_eq!(canonise(&decoded, 1)?.code, code);
    }
    Ok(())
}

#[test]
fn encoding_is_symmetry_invariant() -> Result<(), apgsynth::Error> {
    let base = r_pentomino();
    let maps = [
        (1, 0, 0, 1),
        (-1, 0, 0, 1),
        (1, 0, 0, -1),
        (-1, 0, 0, -1),
        (0, 1, 1, 0),
        (0, -1, 1, 0),
        (0, 1, -1, 0),
        (0, -1, -1, 0),
    ];
    let code = canonise(&base, 1)?.code;
    for &(a, b, c, d) in maps.iter() {
        let transformed = Transform::new(5, -3, a, b, c, d).apply(&base);
        assert_eq!(canonise(&transformed, 1)?.code, code);
    }
    Ok(())
}

#[test]
fn decode_profiles_disagree_on_z_escapes() -> Result<(), apgsynth::Error> {
    // `yz1` under the extended profile is a 4+35 skip still awaiting its
    // count; under the simple profile the `z` closes the escape.
    let extended = decode("xs2_1yz11", DecodeProfile::Extended)?;
    assert_eq!(extended, pattern(&[(0, 0), (41, 0)]));
    let simple = decode("xs2_1yz11", DecodeProfile::Simple)?;
    assert_eq!(simple, pattern(&[(0, 0), (40, 0), (41, 0)]));
    Ok(())
}

#[test]
fn decode_rejects_malformed_codes() {
    assert!(matches!(
        decode("abc", DecodeProfile::Extended),
        Err(apgsynth::Error::BadHeader(_))
    ));
    assert!(matches!(
        decode("xs433", DecodeProfile::Extended),
        Err(apgsynth::Error::MissingSeparator(_))
    ));
    assert!(matches!(
        decode("xs4_3#", DecodeProfile::Extended),
        Err(apgsynth::Error::BadSymbol('#'))
    ));
    assert!(matches!(
        decode("xs4_3y", DecodeProfile::Extended),
        Err(apgsynth::Error::DanglingEscape(_))
    ));
}

#[test]
fn analyse_blinker() {
    match analyse_object(&blinker(), 46) {
        ObjectAnalysis::Object { period, swept } => {
            assert_eq!(period, 2);
            assert_eq!(
                swept,
                Rect {
                    x: 0,
                    y: -1,
                    width: 3,
                    height: 3
                }
            );
        }
        other => panic!("expected an object, got {:?}", other),
    }
}

#[test]
fn analyse_travelling_pattern_is_unresolved() {
    // A glider translates, so the exact-recurrence test never fires.
    let glider = Heading::Northeast.shape();
    assert_eq!(analyse_object(&glider, 46), ObjectAnalysis::Unresolved);
    assert_eq!(analyse_object(&Pattern::new(), 46), ObjectAnalysis::Empty);
}

#[test]
fn glider_extraction_round_trip() -> Result<(), apgsynth::Error> {
    let mut salvo = Salvo::default();
    salvo.lanes[Heading::Northeast.index()].push(LaneRecord { lane: 5, timing: 3 });

    let mut world = World::from_pattern(&salvo.place(0));
    let extracted = remove_gliders(&mut world)?;
    assert!(world.pattern().is_empty());
    assert_eq!(extracted, salvo);
    Ok(())
}

#[test]
fn extraction_finds_all_headings() -> Result<(), apgsynth::Error> {
    let mut salvo = Salvo::default();
    for (i, heading) in Heading::ALL.iter().enumerate() {
        salvo.lanes[heading.index()].push(LaneRecord {
            lane: 60 * i as i32,
            timing: 0,
        });
    }

    let mut world = World::from_pattern(&salvo.place(0));
    let mut extracted = remove_gliders(&mut world)?;
    extracted.sort_lanes();
    assert!(world.pattern().is_empty());
    assert_eq!(extracted, salvo);
    assert_eq!(extracted.glider_count(), 4);
    Ok(())
}

#[test]
fn world_xor_placement() {
    let mut world = World::from_pattern(&block());
    world.place(&block(), PlaceMode::Xor);
    assert!(world.is_empty());
    world.place(&block(), PlaceMode::Xor);
    assert_eq!(world.pattern(), block());
}

#[test]
fn life_history_remembers_dead_cells() {
    let mut world = World::from_pattern(&blinker());
    world.run(&LifeHistory, 1);
    // The ends of the blinker died this generation and are remembered.
    assert_eq!(world.get_cell((0, 0)), 2);
    assert_eq!(world.get_cell((2, 0)), 2);
    assert_eq!(world.get_cell((1, 0)), 1);
    assert_eq!(world.get_cell((1, -1)), 1);
    assert_eq!(world.get_cell((1, 1)), 1);
}

#[test]
fn still_life_canonicalises_to_degenerate_edge() -> Result<(), apgsynth::Error> {
    let config = Config::new();
    match canonise_synthesis(&block(), &config)? {
        Outcome::Success(edge) => {
            assert_eq!(edge.input, "xs4_33");
            assert_eq!(edge.output, "xs4_33");
            assert_eq!(edge.phase, 0);
            assert!(edge.salvo.is_empty());
            assert_eq!(edge.transform, Transform::identity());
        }
        other => panic!("expected success, got {:?}", other),
    }
    Ok(())
}

#[test]
fn departing_glider_is_not_a_synthesis() -> Result<(), apgsynth::Error> {
    // A block with a glider flying away from it: rewinding the glider
    // along its lane sends it straight through the block, so the
    // reconstruction cannot cancel the original pattern.
    let departing = block().union(&Heading::Northeast.shape().translate(10, -10));
    let config = Config::new();
    assert_eq!(canonise_synthesis(&departing, &config)?, Outcome::Fail);
    // Deterministic: the same input yields the same outcome again.
    assert_eq!(canonise_synthesis(&departing, &config)?, Outcome::Fail);
    Ok(())
}

#[test]
fn eternal_gliders_fail_to_settle() -> Result<(), apgsynth::Error> {
    // Two gliders on far-apart lanes flying away from each other pass
    // every reconstruction check but never settle into a periodic
    // object.
    let mut salvo = Salvo::default();
    salvo.lanes[Heading::Northeast.index()].push(LaneRecord { lane: 0, timing: 0 });
    salvo.lanes[Heading::Southwest.index()].push(LaneRecord {
        lane: 40,
        timing: 80,
    });
    let config = Config::new();
    assert_eq!(canonise_synthesis(&salvo.place(0), &config)?, Outcome::Fail);
    Ok(())
}

#[test]
fn edge_record_round_trip() -> Result<(), apgsynth::Error> {
    let edge = Edge {
        input: "0".to_string(),
        output: "xs4_33".to_string(),
        phase: 3,
        salvo: Salvo {
            lanes: [
                vec![LaneRecord { lane: 0, timing: 3 }],
                vec![],
                vec![
                    LaneRecord { lane: -2, timing: 5 },
                    LaneRecord { lane: 1, timing: 0 },
                ],
                vec![],
            ],
        },
        transform: Transform::new(4, -1, 0, -1, 1, 0),
    };
    let line = edge.to_string();
    assert_eq!(line, "0;xs4_33;3;0,3;;-2,5,1,0;;4,-1,0,-1,1,0");
    let parsed: Edge = line.parse()?;
    assert_eq!(parsed, edge);
    assert_eq!(parsed.cost(), 3);
    Ok(())
}

#[test]
fn edge_record_rejects_malformed_lines() {
    assert!(matches!(
        "a;b;c".parse::<Edge>(),
        Err(apgsynth::Error::EdgeFieldCount(3))
    ));
    assert!(matches!(
        "0;0;0;1;;;;0,0,1,0,0,1".parse::<Edge>(),
        Err(apgsynth::Error::EdgeLaneParity(_))
    ));
    assert!(matches!(
        "0;0;0;;;;;0,0,2,0,0,1".parse::<Edge>(),
        Err(apgsynth::Error::BadDeterminant(_))
    ));
    assert!(matches!(
        "0;0;zero;;;;;0,0,1,0,0,1".parse::<Edge>(),
        Err(apgsynth::Error::EdgeNumber(_))
    ));
}

#[test]
fn synthesis_costs_accumulate_along_paths() -> Result<(), apgsynth::Error> {
    let paths = parse_paths(vec![
        "0;xs4_33;0;3,0;5,2;;;0,0,1,0,0,1",
        "xs4_33;xp2_7;0;1,1;;;;0,0,1,0,0,1",
    ])?;
    assert_eq!(synthesis_cost(&paths, "0"), Some(0));
    assert_eq!(synthesis_cost(&paths, "xs4_33"), Some(2));
    assert_eq!(synthesis_cost(&paths, "xp2_7"), Some(3));
    assert_eq!(synthesis_cost(&paths, "xs1_1"), None);

    let looped = parse_paths(vec!["xp2_7;xp2_7;0;1,2;;;;0,0,1,0,0,1"])?;
    assert_eq!(synthesis_cost(&looped, "xp2_7"), None);
    Ok(())
}

#[test]
fn transform_algebra() {
    let t = Transform::new(3, -2, 0, -1, 1, 0);
    assert_eq!(t.det(), 1);
    assert_eq!(t.compose(&t.inverse()), Transform::identity());
    assert_eq!(t.inverse().compose(&t), Transform::identity());
    assert_eq!(t.act_on((1, 0)), (3, -1));

    let flip = Transform::new(0, 0, -1, 0, 0, 1);
    assert_eq!(flip.det(), -1);
    assert_eq!(flip.inverse(), flip);
}

#[test]
fn decomposition_extracts_the_glider() -> Result<(), apgsynth::Error> {
    // Shorter horizons keep the history window small; they are still far
    // beyond what a lone glider needs.
    let config = Config::new().set_infection_steps(256).set_horizon(160);
    let glider = Heading::Northeast.shape();
    let synths = find_syntheses(&glider, &config)?;
    assert_eq!(synths, vec![glider]);
    Ok(())
}

#[test]
fn decomposition_discards_gliderless_chunks() -> Result<(), apgsynth::Error> {
    let config = Config::new().set_infection_steps(256).set_horizon(160);
    // The glider flies up and to the right; the block sits well outside
    // its light cone and contributes no synthesis.
    let combined = Heading::Northeast.shape().union(&block().translate(60, 60));
    let synths = find_syntheses(&combined, &config)?;
    assert_eq!(synths, vec![Heading::Northeast.shape()]);
    Ok(())
}

/// Two gliders on adjacent lanes whose head-on collision settles into a
/// block.
fn block_synthesis_salvo() -> Salvo {
    let mut salvo = Salvo::default();
    salvo.lanes[Heading::Northeast.index()].push(LaneRecord { lane: 0, timing: 0 });
    salvo.lanes[Heading::Southwest.index()].push(LaneRecord { lane: 4, timing: 3 });
    salvo
}

#[test]
fn two_glider_collision_synthesises_a_block() -> Result<(), apgsynth::Error> {
    let salvo = block_synthesis_salvo();
    let config = Config::new();

    let edge = match canonise_synthesis(&salvo.place(-40), &config)? {
        Outcome::Success(edge) => edge,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(edge.input, "0");
    assert_eq!(edge.output, "xs4_33");
    assert_eq!(edge.phase, 0);
    assert_eq!(edge.cost(), 2);
    assert_eq!(edge.salvo.glider_count(), 2);
    assert_eq!(edge.transform.det().abs(), 1);

    // Translating the whole salvo in time gives the same synthesis, so
    // the canonical edge must come out identical.
    assert_eq!(
        canonise_synthesis(&salvo.place(-80), &config)?,
        Outcome::Success(edge)
    );
    Ok(())
}

#[test]
fn canonical_edges_are_fixed_points() -> Result<(), apgsynth::Error> {
    let config = Config::new();
    let edge = match canonise_synthesis(&block_synthesis_salvo().place(-40), &config)? {
        Outcome::Success(edge) => edge,
        other => panic!("expected success, got {:?}", other),
    };

    // Replaying the canonical salvo and canonicalising again must
    // reproduce the edge exactly, lanes, timings and transform included.
    let replayed = edge.salvo.place(-40);
    assert_eq!(
        canonise_synthesis(&replayed, &config)?,
        Outcome::Success(edge)
    );
    Ok(())
}

#[test]
fn crowded_gliders_fail_the_spacing_check() -> Result<(), apgsynth::Error> {
    // Two same-heading gliders two phases apart on lanes only four cells
    // apart. With no opposing gliders the canonical time is 0, so the
    // reconstruction trivially matches the given pattern; but placing the
    // salvo four generations earlier and evolving forward makes the pair
    // interfere, which the spacing validation must reject.
    let mut salvo = Salvo::default();
    salvo.lanes[Heading::Northeast.index()].push(LaneRecord { lane: 0, timing: 0 });
    salvo.lanes[Heading::Northeast.index()].push(LaneRecord { lane: 4, timing: 2 });
    let config = Config::new();
    assert_eq!(canonise_synthesis(&salvo.place(0), &config)?, Outcome::Fail);
    Ok(())
}

#[test]
fn decomposition_keeps_minimal_synthesis_whole() -> Result<(), apgsynth::Error> {
    let config = Config::new().set_infection_steps(256).set_horizon(160);
    // A minimal two-glider synthesis is causally one piece: splitting it
    // must return the synthesis itself and nothing else.
    let start = block_synthesis_salvo().place(-40);
    let synths = find_syntheses(&start, &config)?;
    assert_eq!(synths, vec![start]);
    Ok(())
}
