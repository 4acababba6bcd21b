//! End-to-end graph building and querying over a small family

use std::collections::HashSet;

use kinship_core::{
    GraphBuilder, GraphIndex, Gender, PersonId, PersonRecord, PersonRecords, RelationKind,
    Relationship, TraversalEngine,
};

struct Katz {
    ellis: PersonId,
    marjorie: PersonId,
    herbert: PersonId,
    marc: PersonId,
    ron: PersonId,
    susan: PersonId,
    dan: PersonId,
    michelle: PersonId,
    paul: PersonId,
    tina: PersonId,
    byron: PersonId,
    elysa: PersonId,
}

fn a(id: PersonId, text: &str) -> String {
    format!("<a href=\"person?id={}\">{}</a>", id, text)
}

impl Katz {
    fn new() -> Self {
        Self {
            ellis: PersonId::new(),
            marjorie: PersonId::new(),
            herbert: PersonId::new(),
            marc: PersonId::new(),
            ron: PersonId::new(),
            susan: PersonId::new(),
            dan: PersonId::new(),
            michelle: PersonId::new(),
            paul: PersonId::new(),
            tina: PersonId::new(),
            byron: PersonId::new(),
            elysa: PersonId::new(),
        }
    }

    fn byron(&self, with_sister: bool) -> PersonRecord {
        let siblings = if with_sister { a(self.elysa, "Elysa") } else { String::new() };
        PersonRecord::new(self.byron, "Byron Katz", Gender::Male)
            .with_siblings(siblings)
            .with_spouses("Susanne")
            .with_parents(format!("{} and {}", a(self.susan, "Susan"), a(self.ron, "Ron")))
            .with_children("Cameron David and Corey")
    }

    fn records(&self) -> PersonRecords {
        let katz_boys = format!(
            "{}, {}, and {}",
            a(self.ron, "Ron"),
            a(self.dan, "Dan"),
            a(self.paul, "Paul")
        );
        let katz_parents = format!(
            "{} and {}",
            a(self.ellis, "Ellis Katz"),
            a(self.marjorie, "Marjorie Katz")
        );

        vec![
            PersonRecord::new(self.ellis, "Ellis Katz", Gender::Male)
                .with_siblings("Florence")
                .with_spouses(a(self.marjorie, "Marjorie Katz"))
                .with_parents("Robert and Ethel")
                .with_children(katz_boys.clone()),
            PersonRecord::new(self.marjorie, "Marjorie Katz", Gender::Female)
                .with_siblings(a(self.herbert, "Herbert Blumberg"))
                .with_spouses(a(self.ellis, "Ellis Katz"))
                .with_parents("Louis and Leah")
                .with_children(katz_boys),
            PersonRecord::new(self.marc, "Marc Blumberg", Gender::Male)
                .with_siblings("Frank and Greg")
                .with_parents(format!("{} and Babette", a(self.herbert, "Herbert Blumberg"))),
            PersonRecord::new(self.herbert, "Herbert Blumberg", Gender::Male)
                .with_siblings(a(self.marjorie, "Marjorie"))
                .with_parents("Louis and Leah")
                .with_children(a(self.marc, "Marc Blumberg")),
            PersonRecord::new(self.ron, "Ron Katz", Gender::Male)
                .with_siblings(format!("{} and {}", a(self.dan, "Dan"), a(self.paul, "Paul")))
                .with_spouses(a(self.susan, "Susan"))
                .with_parents(katz_parents.clone())
                .with_children(format!("{} {}", a(self.byron, "Byron"), a(self.elysa, "Elysa"))),
            PersonRecord::new(self.susan, "Susan Katz", Gender::Female)
                .with_siblings("Gary")
                .with_spouses(a(self.ron, "Ron"))
                .with_children(format!(
                    "{} and {}",
                    a(self.byron, "Byron"),
                    a(self.elysa, "Elysa")
                )),
            PersonRecord::new(self.dan, "Dan Katz", Gender::Male)
                .with_siblings(format!("{} and {}", a(self.ron, "Ron"), a(self.paul, "Paul")))
                .with_spouses(a(self.michelle, "Michelle"))
                .with_parents(katz_parents.clone())
                .with_children("Erica and Joelle"),
            PersonRecord::new(self.michelle, "Michelle Katz", Gender::Female)
                .with_spouses(format!("<a href=person?id={}>Dan</a>", self.dan))
                .with_children("Erica and Joelle"),
            self.byron(true),
            PersonRecord::new(self.elysa, "Elysa Katz", Gender::Female)
                .with_siblings(format!("<a href=person?id={}>Byron</a>", self.byron))
                .with_spouses("Dan")
                .with_parents(format!("{} and {}", a(self.ron, "Ron"), a(self.susan, "Susan")))
                .with_children("Nathan Viven and Andrew"),
            PersonRecord::new(self.paul, "Paul Katz", Gender::Male)
                .with_siblings(format!("{} and {}", a(self.ron, "Ron"), a(self.dan, "Dan")))
                .with_spouses(a(self.tina, "Tina"))
                .with_parents(katz_parents),
            PersonRecord::new(self.tina, "Tina Katz", Gender::Female)
                .with_spouses(a(self.paul, "Paul"))
                .with_parents("Reva"),
        ]
        .into()
    }
}

fn built(katz: &Katz) -> (PersonRecords, GraphIndex) {
    let records = katz.records();
    let index = GraphIndex::new();
    GraphBuilder::new().build_full(&records, &index).unwrap();
    (records, index)
}

fn ids(relationships: &[Relationship]) -> Vec<PersonId> {
    relationships.iter().map(Relationship::id).collect()
}

#[test]
fn test_full_build_has_a_node_per_record_and_no_dangling_edges() {
    let katz = Katz::new();
    let (records, index) = built(&katz);

    assert_eq!(index.len(), records.len());
    assert!(index.dangling_targets().is_empty());
    for record in records.iter() {
        assert_eq!(index.get(&record.id).unwrap().name(), record.name);
    }
}

#[test]
fn test_full_build_is_idempotent() {
    let katz = Katz::new();
    let (records, index) = built(&katz);
    let first = index.edge_triples();

    GraphBuilder::new().build_full(&records, &index).unwrap();
    assert_eq!(index.edge_triples(), first);
}

#[test]
fn test_unquoted_and_prose_links_resolve() {
    let katz = Katz::new();
    let (_, index) = built(&katz);

    let michelle = index.get(&katz.michelle).unwrap();
    assert_eq!(michelle.targets(RelationKind::Spouse).collect::<Vec<_>>(), vec![katz.dan]);

    // "Robert and Ethel" carries no anchors
    let ellis = index.get(&katz.ellis).unwrap();
    assert_eq!(ellis.targets(RelationKind::Parent).count(), 0);
    assert_eq!(
        ellis.targets(RelationKind::Child).collect::<Vec<_>>(),
        vec![katz.ron, katz.dan, katz.paul]
    );
}

#[test]
fn test_ron_siblings() {
    let katz = Katz::new();
    let (_, index) = built(&katz);

    let siblings = TraversalEngine::siblings(&index, &katz.ron);
    assert_eq!(ids(&siblings), vec![katz.dan, katz.paul]);
    assert_eq!(siblings[0].description, "brother of Ron Katz");
}

#[test]
fn test_byron_ancestors() {
    let katz = Katz::new();
    let (_, index) = built(&katz);

    let ancestors = TraversalEngine::ancestors(&index, &katz.byron, 3);
    let by_id = |id: PersonId| ancestors.iter().find(|r| r.id() == id).unwrap();

    assert_eq!(by_id(katz.susan).description, "mother of Byron Katz");
    assert_eq!(by_id(katz.ron).distance, 1);
    assert_eq!(by_id(katz.ellis).description, "father of father of Byron Katz");
    assert_eq!(by_id(katz.marjorie).distance, 2);
    assert!(ancestors.iter().all(|r| r.id() != katz.herbert));
}

#[test]
fn test_scoped_rebuild_after_removing_sister() {
    let katz = Katz::new();
    let (mut records, index) = built(&katz);
    let builder = GraphBuilder::new();

    let before = TraversalEngine::siblings(&index, &katz.byron);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].description, "sister of Byron Katz");

    let edited = katz.byron(false);
    let scope: HashSet<PersonId> = builder
        .scope_of(&edited)
        .unwrap()
        .into_iter()
        .chain(builder.scope_of(&katz.byron(true)).unwrap())
        .collect();
    let untouched: Vec<_> = index
        .snapshot()
        .into_iter()
        .filter(|node| !scope.contains(&node.id()))
        .collect();
    assert_eq!(untouched.len(), 8);

    records.insert(edited.clone());
    builder.rebuild_scoped(&edited, &records, &index).unwrap();

    assert!(TraversalEngine::siblings(&index, &katz.byron).is_empty());

    // Elysa's own record still lists Byron
    let elysa_siblings = TraversalEngine::siblings(&index, &katz.elysa);
    assert_eq!(ids(&elysa_siblings), vec![katz.byron]);
    assert_eq!(elysa_siblings[0].description, "brother of Elysa Katz");

    // outside the scope, nodes are the same published instances
    for node in &untouched {
        let current = index.get(&node.id()).unwrap();
        assert!(std::sync::Arc::ptr_eq(node, &current), "{} was rebuilt", node);
    }
    assert!(index.dangling_targets().is_empty());
}

#[test]
fn test_scoped_rebuild_matches_full_rebuild() {
    let katz = Katz::new();
    let (mut records, index) = built(&katz);
    let builder = GraphBuilder::new();

    let edited = katz.byron(false);
    records.insert(edited.clone());
    builder.rebuild_scoped(&edited, &records, &index).unwrap();

    let fresh = GraphIndex::new();
    builder.build_full(&records, &fresh).unwrap();
    assert_eq!(index.edge_triples(), fresh.edge_triples());
}

#[test]
fn test_every_edge_is_asserted_by_its_source_record() {
    let katz = Katz::new();
    let (records, index) = built(&katz);
    let builder = GraphBuilder::new();

    for node in index.snapshot() {
        let record = records.get(&node.id()).unwrap();
        let referenced: HashSet<PersonId> = builder.scope_of(record).unwrap().into_iter().collect();
        for edge in node.edges() {
            assert!(referenced.contains(&edge.target), "{} has an unasserted edge", node);
        }
    }
}

#[test]
fn test_removed_person_disappears_from_queries() {
    let katz = Katz::new();
    let (records, index) = built(&katz);

    let remaining: PersonRecords = records
        .iter()
        .filter(|r| r.id != katz.tina)
        .cloned()
        .collect();
    GraphBuilder::new()
        .rebuild_removed(katz.tina, &remaining, &index)
        .unwrap();

    assert!(!index.contains(&katz.tina));
    // Paul's record still links Tina, so his spouse edge is simply dropped
    let paul = index.get(&katz.paul).unwrap();
    assert_eq!(paul.targets(RelationKind::Spouse).count(), 0);
    let relatives = TraversalEngine::close_relatives_including_marriage(&index, &katz.paul, 3);
    assert!(relatives.iter().all(|r| r.id() != katz.tina));
}

#[test]
fn test_other_relatives_for_byron() {
    let katz = Katz::new();
    let (_, index) = built(&katz);

    let others = TraversalEngine::other_relatives(&index, &katz.byron, 3);
    let found = ids(&others);

    assert!(found.contains(&katz.elysa));
    assert!(found.contains(&katz.dan));
    assert!(!found.contains(&katz.byron));
    assert!(!found.contains(&katz.ron));
    assert!(!found.contains(&katz.ellis));
    assert!(others.windows(2).all(|w| w[0].distance <= w[1].distance));
}
