//! Built-in data written when nothing can be fetched, so output files always exist.

use crate::models::{Comment, FetchResult, Post, PostType, SlangEntry};

struct FallbackPost {
    subreddit: &'static str,
    title: &'static str,
    author: &'static str,
    time: &'static str,
    upvotes: i64,
    comments: u64,
    text: &'static str,
    post_type: PostType,
    image: Option<&'static str>,
    replies: &'static [(&'static str, &'static str, i64, &'static str)],
}

const FALLBACK_POSTS: &[FallbackPost] = &[
    FallbackPost {
        subreddit: "science",
        title: "Breakthrough study reveals how social media algorithms fundamentally alter human cognitive patterns",
        author: "cognitive_researcher",
        time: "4 hours ago",
        upvotes: 1847,
        comments: 423,
        text: "A comprehensive study tracking 50,000 participants reveals how algorithmic content curation affects neural pathways and critical thinking abilities.",
        post_type: PostType::Text,
        image: None,
        replies: &[
            (
                "research_fan",
                "This is fascinating research. The implications for understanding digital communication are huge.",
                45,
                "2 hours ago",
            ),
            (
                "skeptical_scientist",
                "While interesting, I wonder about the sample size and methodology. Need to see the peer review.",
                23,
                "1 hour ago",
            ),
        ],
    },
    FallbackPost {
        subreddit: "blurrypicturesofcats",
        title: "My cat moving at the speed of light",
        author: "cat_photographer",
        time: "2 hours ago",
        upvotes: 2341,
        comments: 89,
        text: "",
        post_type: PostType::Image,
        image: Some("https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=600&h=400&fit=crop"),
        replies: &[(
            "cat_lover_99",
            "This is art. Pure, blurry art.",
            67,
            "1 hour ago",
        )],
    },
    FallbackPost {
        subreddit: "dbz",
        title: "Goku vs Superman: Who would win in a real fight?",
        author: "anime_debater",
        time: "6 hours ago",
        upvotes: 756,
        comments: 234,
        text: "Settling this debate once and for all with power scaling analysis...",
        post_type: PostType::Text,
        image: None,
        replies: &[
            (
                "power_scaler",
                "Goku wins easily. Ultra Instinct is basically unbeatable.",
                34,
                "3 hours ago",
            ),
            (
                "superman_fan",
                "Superman has no limits though. He always finds a way to win.",
                28,
                "2 hours ago",
            ),
        ],
    },
];

/// Three posts with their comments, numbered 1..=3.
pub fn fallback_result() -> FetchResult {
    let mut result = FetchResult::default();

    for fp in FALLBACK_POSTS {
        let post = Post {
            id: result.next_id(),
            subreddit: fp.subreddit.to_string(),
            title: fp.title.to_string(),
            author: fp.author.to_string(),
            time: fp.time.to_string(),
            upvotes: fp.upvotes,
            comments: fp.comments,
            text: fp.text.to_string(),
            url: None,
            post_type: fp.post_type,
            image: fp.image.map(str::to_string),
            reddit_id: None,
            reddit_permalink: None,
        };

        let comments = fp
            .replies
            .iter()
            .map(|(author, text, upvotes, time)| Comment {
                author: author.to_string(),
                text: text.to_string(),
                upvotes: *upvotes,
                time: time.to_string(),
                reddit_id: None,
            })
            .collect();

        result.push(post, comments);
    }

    result
}

const FALLBACK_SLANG: &[(&str, &str)] = &[
    ("tbh", "to be honest"),
    ("ngl", "not gonna lie"),
    ("fr", "for real"),
    ("lowkey", "somewhat or secretly"),
    ("highkey", "obviously or very much"),
    ("deadass", "seriously or honestly"),
    ("no cap", "no lie, for real"),
    ("periodt", "period, end of discussion"),
    ("slay", "to do something really well"),
    ("bestie", "best friend"),
    ("queen", "someone amazing"),
    ("king", "someone amazing (masculine)"),
    ("iconic", "legendary or memorable"),
    ("legend", "someone amazing"),
    ("fire", "awesome or excellent"),
    ("based", "agreeable or admirable"),
    ("cringe", "embarrassing or awkward"),
    ("mid", "mediocre or average"),
    ("bussin", "really good"),
    ("sheesh", "expression of amazement"),
    ("fam", "family or close friends"),
    ("bet", "agreement or confirmation"),
    ("cap", "lie or false statement"),
    ("facts", "truth or agreement"),
    ("snatched", "looking good"),
    ("tea", "gossip or truth"),
    ("spill", "to tell gossip"),
    ("stan", "to be a big fan of"),
    ("simp", "someone who does too much for someone they like"),
    ("flex", "to show off"),
    ("clout", "influence or fame"),
    ("ghost", "to ignore someone"),
    ("vibe", "feeling or mood"),
    ("mood", "relatable feeling"),
    ("sus", "suspicious"),
    ("say less", "understood"),
    ("hits different", "is uniquely good"),
    ("slaps", "is really good"),
    ("sending me", "making me laugh"),
    ("rent free", "constantly thinking about"),
    ("main character", "protagonist energy"),
    ("understood the assignment", "did exactly what was needed"),
    ("its giving", "it seems like"),
    ("the way", "expression of emphasis"),
    ("not me", "expression of disbelief"),
    ("pov", "point of view"),
    ("iykyk", "if you know you know"),
    ("this aint it", "this is wrong"),
    ("chile", "child (expression)"),
    ("purr", "expression of approval"),
    ("periodt pooh", "period with emphasis"),
    ("okurrr", "ok with attitude"),
    ("sksksks", "expression of laughter"),
    ("and i oop", "awkward moment expression"),
    ("no literally", "agreement with emphasis"),
    ("bestie vibes", "best friend energy"),
    ("main character energy", "confident protagonist vibes"),
    ("that part", "agreement with emphasis"),
    ("the tea", "the truth or gossip"),
    ("spill the tea", "tell the gossip"),
    ("sis", "sister (term of endearment)"),
    ("bro", "brother (casual)"),
    ("dude", "person (casual)"),
    ("mans", "person (slang)"),
    ("homie", "friend"),
    ("squad", "friend group"),
    ("crew", "group of friends"),
    ("gang", "friend group"),
    ("tribe", "close group"),
    ("rizz", "charisma"),
    ("ratio", "when reply gets more likes"),
    ("touch grass", "go outside"),
    ("chronically online", "too much internet time"),
    ("gaslight gatekeep girlboss", "satirical phrase"),
    ("chefs kiss", "perfect"),
    ("ate and left no crumbs", "did perfectly"),
    ("mother", "iconic person"),
    ("serve", "look good"),
    ("soft launch", "subtle introduction"),
    ("hard launch", "official announcement"),
    ("green flag", "positive sign"),
    ("red flag", "warning sign"),
    ("ick", "sudden turn-off"),
    ("w", "win"),
    ("l", "loss"),
    ("npc", "basic person"),
    ("pick me", "attention seeker"),
    ("im deceased", "very funny"),
    ("sending", "hilarious"),
    ("no thoughts head empty", "not thinking"),
    ("brain go brrr", "intense thinking"),
    ("himbo", "attractive but not smart guy"),
    ("girlboss", "successful woman"),
    ("karen", "entitled person"),
    ("ok boomer", "dismissive to older person"),
    ("very demure", "very modest"),
    ("very mindful", "very aware"),
    ("very cutesy", "very cute"),
];

pub fn fallback_slang() -> Vec<SlangEntry> {
    FALLBACK_SLANG
        .iter()
        .map(|(slang, meaning)| SlangEntry {
            slang: slang.to_string(),
            meaning: meaning.to_string(),
        })
        .collect()
}
