use crate::collect::ClassMap;
use rustc_hash::FxHashSet;

/// Replaces every entry of the hierarchy map in place by the set of all of
/// its ancestors, direct and transitive.
///
/// The map may contain cycles (malformed input); the traversal uses an
/// explicit visited set and work list, so each class is expanded at most
/// once per pass and the stack depth stays bounded by the number of
/// distinct classes. After the traversal, every class that was referenced
/// only as a superclass target receives its own entry with an empty
/// ancestor set, so the final key set covers every class mentioned by a
/// hierarchy edge.
///
/// The depth-first pass alone would be sensitive to traversal order when
/// branches share intermediate classes on a cycle. To keep the result
/// order-independent, relaxation sweeps run afterwards until no ancestor
/// set grows; on acyclic input the first sweep already finds nothing to
/// add. The whole operation is idempotent.
pub fn propagate(hierarchy: &mut ClassMap) {
    let mut visited = FxHashSet::default();
    let roots: Vec<String> = hierarchy.keys().cloned().collect();
    for root in roots {
        expand(hierarchy, root, &mut visited);
    }
    for class in visited {
        hierarchy.entry(class).or_default();
    }
    relax_to_fixpoint(hierarchy);
}

/// One memoized depth-first expansion starting at `root`.
///
/// A class already in the visited set is not re-expanded; its currently
/// stored ancestor set is still folded into its dependents.
fn expand(hierarchy: &mut ClassMap, root: String, visited: &mut FxHashSet<String>) {
    if !visited.insert(root.clone()) {
        return;
    }
    let supers = direct_supers(hierarchy, &root);
    let mut stack = vec![(root, supers, 0usize)];
    loop {
        let next = match stack.last_mut() {
            None => break,
            Some((_, supers, cursor)) => {
                if *cursor < supers.len() {
                    let next = supers[*cursor].clone();
                    *cursor += 1;
                    Some(next)
                } else {
                    None
                }
            }
        };
        match next {
            Some(next) => {
                if visited.insert(next.clone()) {
                    let supers = direct_supers(hierarchy, &next);
                    stack.push((next, supers, 0));
                }
            }
            None => {
                if let Some((class, supers, _)) = stack.pop() {
                    fold_ancestors(hierarchy, &class, &supers);
                }
            }
        }
    }
}

fn direct_supers(hierarchy: &ClassMap, class: &str) -> Vec<String> {
    hierarchy
        .get(class)
        .map(|supers| supers.iter().cloned().collect())
        .unwrap_or_default()
}

/// Extends the ancestor set of `class` by the resolved sets of its direct
/// superclasses.
fn fold_ancestors(hierarchy: &mut ClassMap, class: &str, supers: &[String]) {
    let mut additions = FxHashSet::default();
    for superclass in supers {
        if let Some(ancestors) = hierarchy.get(superclass) {
            additions.extend(ancestors.iter().cloned());
        }
    }
    if additions.is_empty() {
        return;
    }
    if let Some(own) = hierarchy.get_mut(class) {
        own.extend(additions);
    }
}

/// Repeats relaxation sweeps until no ancestor set grows anymore.
fn relax_to_fixpoint(hierarchy: &mut ClassMap) {
    let classes: Vec<String> = hierarchy.keys().cloned().collect();
    loop {
        let mut changed = false;
        for class in &classes {
            let supers = direct_supers(hierarchy, class);
            let mut additions = Vec::new();
            for superclass in &supers {
                if let Some(ancestors) = hierarchy.get(superclass) {
                    additions.extend(ancestors.iter().cloned());
                }
            }
            if let Some(own) = hierarchy.get_mut(class) {
                let before = own.len();
                own.extend(additions);
                changed |= own.len() > before;
            }
        }
        if !changed {
            break;
        }
    }
}
