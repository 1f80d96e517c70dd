//! Infection-based synthesis decomposition.
//!
//! A file of syntheses is typically one big pattern containing several
//! independent constructions. Marking a single cell as infected and
//! letting the [`InfectLife`] rule spread over a [`LifeHistory`] snapshot
//! isolates one causally connected chunk of the pattern's whole
//! evolution; peeling chunks off repeatedly, and seeding new infections
//! from where each chunk's input and output shapes occur elsewhere in the
//! timeline, splits the pattern into minimal single-edge syntheses.

use crate::{
    cells::{Coord, Pattern},
    config::Config,
    error::Error,
    glider::remove_gliders,
    rules::{InfectLife, LifeHistory},
    world::World,
};
use std::collections::HashSet;

/// Infects the given seed cells, lets the infection spread, then removes
/// and returns every infected cell.
fn infect_and_remove(world: &mut World, germ: &[Coord], steps: u32) -> Vec<Coord> {
    for &coord in germ {
        world.set_cell(coord, 3);
    }
    world.run(&InfectLife, steps);

    let mut chunk = Vec::new();
    for (coord, state) in world.states() {
        if state >= 3 {
            world.set_cell(coord, 0);
            chunk.push(coord);
        }
    }
    chunk
}

/// The chunk's cells that are live in `pattern`.
fn subset_of(chunk: &[Coord], pattern: &Pattern) -> Pattern {
    chunk
        .iter()
        .filter(|&&coord| pattern.contains(coord))
        .collect()
}

/// Finds every occurrence of `shape` inside `haystack` and appends the
/// matched cells of each occurrence to `results`.
///
/// A match anchors the shape's first cell (row-major) at a live cell of
/// the haystack, with every shape cell live and the shape's Moore
/// boundary dead.
fn find_occurrences(results: &mut Vec<Vec<Coord>>, shape: &Pattern, haystack: &Pattern) {
    if shape.is_empty() || haystack.is_empty() {
        return;
    }
    let cells = shape.sorted_cells();
    let (ax, ay) = cells[0];
    let wanted: Vec<Coord> = cells.iter().map(|&(x, y)| (x - ax, y - ay)).collect();
    let shifted: Pattern = wanted.iter().collect();
    let unwanted = shifted.boundary();

    for &(x, y) in &haystack.sorted_cells() {
        if !wanted
            .iter()
            .all(|&(dx, dy)| haystack.contains((x + dx, y + dy)))
        {
            continue;
        }
        if unwanted
            .iter()
            .any(|&(dx, dy)| haystack.contains((x + dx, y + dy)))
        {
            continue;
        }
        results.push(wanted.iter().map(|&(dx, dy)| (x + dx, y + dy)).collect());
    }
}

/// Splits a pattern into what should be all of its minimal glider
/// syntheses.
///
/// The worklist is processed LIFO with a seen-set keyed by the sorted,
/// origin-shifted cell coordinates, so identical sub-patterns are never
/// processed twice; every step only adds matches found within the fixed
/// history window, which bounds the search.
pub fn find_syntheses(start: &Pattern, config: &Config) -> Result<Vec<Pattern>, Error> {
    // The full history of the pattern's evolution.
    let mut world = World::from_pattern(start);
    world.run(&LifeHistory, config.infection_steps);
    let history = world.states();

    // Peel infection-connected chunks off the history until none remain.
    let mut inputs: Vec<Pattern> = Vec::new();
    while !world.is_empty() {
        let germ = world.states()[0].0;
        let chunk = infect_and_remove(&mut world, &[germ], config.infection_steps);
        inputs.push(subset_of(&chunk, start));
    }

    let end_cells = start.evolve(config.horizon);

    let mut seen: HashSet<Vec<Coord>> = HashSet::new();
    let mut synths = Vec::new();

    while let Some(input_cells) = inputs.pop() {
        if !seen.insert(input_cells.origin_key()) {
            continue;
        }

        let output_cells = input_cells.evolve(config.horizon);

        let mut stripped = World::from_pattern(&input_cells);
        let salvo = remove_gliders(&mut stripped)?;
        if salvo.is_empty() {
            // No gliders: not a synthesis fragment.
            continue;
        }
        synths.push(input_cells);
        let core = stripped.pattern();

        // Search for this chunk's input in the end state of the whole
        // pattern, and for its output in the start state; each match
        // seeds a further infection.
        let mut germs = Vec::new();
        find_occurrences(&mut germs, &core, &end_cells);
        find_occurrences(&mut germs, &output_cells, start);

        for germ in germs {
            let mut snapshot = World::new();
            snapshot.load_states(&history);
            let chunk = infect_and_remove(&mut snapshot, &germ, config.infection_steps);
            inputs.push(subset_of(&chunk, start));
        }
    }

    Ok(synths)
}
