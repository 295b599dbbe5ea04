//! Built-in content: the Twelve Steps, the twelve recovery themes, the
//! literature catalog and the static informational pages.
//!
//! Remote step and theme rows are layered over these by [`crate::merge`].
//! Everything is built fresh by [`Defaults::stock`] on every call, so two
//! runs in one process (tests, mostly) never see each other's merges.

use crate::types::{Book, StaticPage, Step, Theme};

/// The fallback dataset handed to the merge layer and the renderers.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub steps: Vec<Step>,
    pub themes: Vec<Theme>,
    pub books: Vec<Book>,
    pub pages: Vec<StaticPage>,
}

impl Defaults {
    pub fn stock() -> Self {
        Self {
            steps: steps(),
            themes: themes(),
            books: books(),
            pages: static_pages(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn step(
    number: u8,
    text: &str,
    month: &str,
    principle: &str,
    description: &[&str],
    questions: &[&str],
    hook: &str,
    tagline: &str,
    pull_quote: &str,
    tools: &[&str],
) -> Step {
    Step {
        number,
        text: text.to_string(),
        month: month.to_string(),
        principle: principle.to_string(),
        description: strings(description),
        questions: strings(questions),
        hook: hook.to_string(),
        tagline: tagline.to_string(),
        pull_quote: pull_quote.to_string(),
        tools: strings(tools),
    }
}

pub fn steps() -> Vec<Step> {
    vec![
        step(
            1,
            "We admitted we were powerless over our addiction, that our lives had become unmanageable.",
            "January",
            "Honesty",
            &[
                "The first step asks for one thing: the truth. Not the whole story of how we got here, just an honest look at where we are.",
                "Admitting powerlessness is not the same as admitting worthlessness. It is the moment we stop fighting a battle we keep losing and start asking for help.",
            ],
            &[
                "What have I tried, on my own, to control my using?",
                "Where has my life become unmanageable?",
                "What am I still afraid to admit?",
            ],
            "The year starts with the truth.",
            "Surrender is where it begins.",
            "We could not get well until we stopped pretending we were fine.",
            &["Write down three moments you tried to control it and could not", "Say it out loud to one person today", "Read the step slowly, once in the morning and once at night"],
        ),
        step(
            2,
            "Came to believe that a Power greater than ourselves could restore us to sanity.",
            "February",
            "Hope",
            &[
                "Step Two does not ask us to define a higher power. It asks whether we are willing to believe that change is possible.",
                "Many of us start with the group itself: people who were where we are and are doing better now.",
            ],
            &[
                "What does sanity look like for me?",
                "Where have I already seen others restored?",
                "What stands in the way of believing?",
            ],
            "Hope is a decision we make before we feel it.",
            "Open to the possibility.",
            "We came, we came to, and we came to believe.",
            &["List people whose recovery you trust", "Notice one thing today that went better than expected", "Keep an open mind for one meeting"],
        ),
        step(
            3,
            "Made a decision to turn our will and our lives over to the care of God as we understood God.",
            "March",
            "Faith",
            &[
                "The third step is a decision, not a feeling. We decide, and then we practise the decision one day at a time.",
                "Turning our will over means letting go of the outcome while still doing the footwork.",
            ],
            &[
                "What am I holding on to that I could hand over?",
                "How do I understand a power greater than myself today?",
                "What would change if I trusted the process?",
            ],
            "The decision comes before the feeling.",
            "Let go of the outcome.",
            "We made a decision, and then we kept making it.",
            &["Say the third step prayer or your own words each morning", "Hand over one worry in writing", "Do the next right thing without knowing the result"],
        ),
        step(
            4,
            "Made a searching and fearless moral inventory of ourselves.",
            "April",
            "Courage",
            &[
                "An inventory counts what is really on the shelves. We list resentments, fears and harms, and we list our strengths too.",
                "Fearless does not mean unafraid. It means we write it down anyway.",
            ],
            &[
                "Who do I resent, and why?",
                "What fears drive my behaviour?",
                "What are my assets?",
            ],
            "Courage is writing it down anyway.",
            "Take stock honestly.",
            "Looking at ourselves clearly was the bravest thing we had done in years.",
            &["Write for fifteen minutes without editing", "Use columns: who, what happened, what it affected, my part", "Call your sponsor before and after"],
        ),
        step(
            5,
            "Admitted to God, to ourselves, and to another human being the exact nature of our wrongs.",
            "May",
            "Integrity",
            &[
                "Secrets keep us sick. In Step Five we bring what we wrote into the light with one trusted person.",
                "Most of us found that the listener had heard it all before, and that we were not as unique as we feared.",
            ],
            &[
                "What am I most afraid to say out loud?",
                "Who is safe to hear my fifth step?",
                "What patterns do I notice when I read my inventory aloud?",
            ],
            "Secrets lose their power when spoken.",
            "Say it out loud.",
            "We were only as sick as our secrets.",
            &["Choose a listener who has done this step", "Set aside uninterrupted time", "Afterwards, sit quietly for an hour"],
        ),
        step(
            6,
            "Were entirely ready to have God remove all these defects of character.",
            "June",
            "Willingness",
            &[
                "Step Six is about readiness. Some defects served us once, and letting them go can feel like losing a friend.",
                "We become ready by noticing what each defect costs us and the people around us.",
            ],
            &[
                "Which defects am I not yet willing to part with?",
                "What does each one cost me?",
                "What would I be like without it?",
            ],
            "Willing to be willing is enough to start.",
            "Become ready.",
            "We did not have to be perfect, only willing.",
            &["Pick one defect and watch for it all day", "Write what it protects you from", "Pray or ask for willingness"],
        ),
        step(
            7,
            "Humbly asked God to remove our shortcomings.",
            "July",
            "Humility",
            &[
                "Humility is seeing ourselves as we really are: not worse, not better, just human.",
                "We ask for help with our shortcomings and then practise the opposite behaviour, one situation at a time.",
            ],
            &[
                "What is the difference between humility and humiliation for me?",
                "Where can I practise the opposite of a shortcoming today?",
                "How do I ask for help?",
            ],
            "Ask, then practise the opposite.",
            "Humbly ask.",
            "Humility is not thinking less of ourselves, it is thinking of ourselves less.",
            &["Ask for help once today", "Practise the opposite of one shortcoming", "End the day by noting progress, not perfection"],
        ),
        step(
            8,
            "Made a list of all persons we had harmed, and became willing to make amends to them all.",
            "August",
            "Love",
            &[
                "The eighth step is a list and a willingness. We are not making amends yet, only getting ready.",
                "We include ourselves on the list, and we let go of the harms others did to us for now.",
            ],
            &[
                "Who belongs on my list?",
                "Which names do I resist writing down?",
                "Am I on my own list?",
            ],
            "The list is the start of freedom.",
            "Become willing.",
            "Willingness to repair the past opened the door to a different future.",
            &["Start the list from your fourth step", "Mark names you are not yet willing to approach", "Talk the list through with your sponsor"],
        ),
        step(
            9,
            "Made direct amends to such people wherever possible, except when to do so would injure them or others.",
            "September",
            "Justice",
            &[
                "Amends are more than apologies. We change the behaviour and, where possible, repair the damage.",
                "Some amends are living amends: we show up differently from now on.",
            ],
            &[
                "What does repair look like for each person on my list?",
                "Where could an amend cause more harm?",
                "What living amends am I making?",
            ],
            "Clean up the wreckage, one name at a time.",
            "Repair the harm.",
            "We made amends and found a freedom we had never known.",
            &["Rehearse an amend with your sponsor", "Keep it about your side of the street", "Follow up with changed behaviour"],
        ),
        step(
            10,
            "Continued to take personal inventory and when we were wrong promptly admitted it.",
            "October",
            "Perseverance",
            &[
                "Step Ten turns the inventory into a daily habit. We look at our day, notice where we went wrong, and put it right quickly.",
                "Promptly is the key word. Small wrongs left alone become resentments.",
            ],
            &[
                "Where was I resentful, selfish, dishonest or afraid today?",
                "Do I owe anyone an apology?",
                "What went well?",
            ],
            "A short daily inventory keeps the slate clean.",
            "Keep checking in.",
            "We kept our side of the street clean, one day at a time.",
            &["Ten minutes of nightly review", "Spot-check inventory when upset", "Admit a wrong within the day"],
        ),
        step(
            11,
            "Sought through prayer and meditation to improve our conscious contact with God as we understood God.",
            "November",
            "Spiritual awareness",
            &[
                "Step Eleven asks us to build a practice. Prayer is talking, meditation is listening.",
                "We start small and stay consistent. A few quiet minutes every day outlast an hour once a month.",
            ],
            &[
                "When in my day can I be still?",
                "What helps me listen?",
                "How do I know what the next right thing is?",
            ],
            "Prayer is talking, meditation is listening.",
            "Seek conscious contact.",
            "In the quiet we found the guidance we had been looking for everywhere else.",
            &["Five minutes of silence each morning", "Read today's reading slowly, twice", "Pause when agitated or doubtful"],
        ),
        step(
            12,
            "Having had a spiritual awakening as the result of these steps, we tried to carry this message to others, and to practise these principles in all our affairs.",
            "December",
            "Service",
            &[
                "The twelfth step closes the circle. We keep what we have by giving it away.",
                "Practising the principles in all our affairs means recovery is not only for meetings. It is how we live at work, at home and everywhere else.",
            ],
            &[
                "How has my life changed through these steps?",
                "Where can I be of service this week?",
                "Which principle do I need to practise more at home?",
            ],
            "We keep it by giving it away.",
            "Carry the message.",
            "Service was the surest way out of our own heads.",
            &["Take a service commitment", "Call a newcomer", "Share your experience honestly"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn theme(
    slug: &str,
    name: &str,
    short_description: &str,
    meta_description: &str,
    body: &str,
    pull_quote: &str,
    theme_tags: &[&str],
    tools: &[&str],
    featured_days: &[u16],
) -> Theme {
    Theme {
        slug: slug.to_string(),
        name: name.to_string(),
        short_description: short_description.to_string(),
        meta_description: meta_description.to_string(),
        body: body.to_string(),
        pull_quote: pull_quote.to_string(),
        theme_tags: strings(theme_tags),
        tools: strings(tools),
        featured_days: featured_days.to_vec(),
        image: format!("assets/themes/{slug}.jpg"),
    }
}

pub fn themes() -> Vec<Theme> {
    vec![
        theme(
            "acceptance",
            "Acceptance",
            "Making peace with what is, so we can change what we can.",
            "Daily readings on acceptance in recovery: letting go of what we cannot control and finding serenity in the present.",
            "Acceptance is not approval. It is the willingness to stop arguing with reality.\n\nWhen we accept where we are, we can finally take the **next right step**.",
            "Acceptance was the answer to all our problems today.",
            &["Acceptance", "Letting Go", "Serenity"],
            &["Say the serenity prayer when stuck", "Name what is and is not yours to change", "Pause before reacting"],
            &[5, 47, 118, 200, 301],
        ),
        theme(
            "gratitude",
            "Gratitude",
            "Noticing what is already good.",
            "Readings on gratitude in recovery: daily practices that shift attention from what is missing to what is here.",
            "Gratitude is a practice, not a mood. We write it down even on the days we do not feel it.\n\nA grateful heart has little room for resentment.",
            "A grateful addict does not use.",
            &["Gratitude", "Joy", "Abundance"],
            &["Write three gratitudes each night", "Thank someone out loud", "Notice one small good thing before noon"],
            &[12, 88, 145, 266, 330],
        ),
        theme(
            "fear",
            "Fear",
            "Facing fear with faith and fellowship.",
            "Readings on fear in recovery: naming fears, sharing them, and walking through them with support.",
            "Fear told us we could not survive without our old ways. Recovery shows us otherwise.\n\nWe face fear by naming it and bringing it into the light.",
            "Courage is fear that has said its prayers.",
            &["Fear", "Courage", "Anxiety"],
            &["Name the fear precisely", "Call someone before acting on fear", "Ask: what is the worst that could realistically happen?"],
            &[20, 96, 151, 222, 318],
        ),
        theme(
            "resentment",
            "Resentment",
            "Letting go of the poison we drink hoping someone else gets sick.",
            "Readings on resentment in recovery: inventory, our part, and the freedom of letting go.",
            "Resentment is the number one offender. It keeps us tied to the past and to the people we resent.\n\nWe look for *our part*, and we pray for the people we resent.",
            "Resentment is like drinking poison and waiting for the other person to die.",
            &["Resentment", "Anger"],
            &["Write it out in inventory columns", "Look for your part", "Pray for the person for two weeks"],
            &[33, 104, 160, 241, 327],
        ),
        theme(
            "surrender",
            "Surrender",
            "Winning by giving up the fight.",
            "Readings on surrender in recovery: the paradox of admitting defeat and finding strength.",
            "Surrender is the beginning of recovery. We stop fighting and start following directions.\n\nIt is not a single moment but a daily choice.",
            "We surrendered to win.",
            &["Surrender", "Powerlessness", "Willingness"],
            &["Start the day by handing it over", "Ask for direction and take it", "Notice where you are still fighting"],
            &[1, 63, 125, 190, 250],
        ),
        theme(
            "service",
            "Service",
            "Keeping recovery by giving it away.",
            "Readings on service in recovery: helping others as a path out of self-centeredness.",
            "Service gets us out of our own heads. Making coffee, sponsoring, showing up early all count.\n\nWe keep what we have by giving it away.",
            "Service was the surest way out of our own heads.",
            &["Service", "Fellowship", "Unity"],
            &["Arrive ten minutes early to set up", "Call a newcomer", "Take a service commitment"],
            &[41, 130, 212, 336, 350],
        ),
        theme(
            "forgiveness",
            "Forgiveness",
            "Setting ourselves free.",
            "Readings on forgiveness in recovery: forgiving others and ourselves without excusing harm.",
            "Forgiveness does not mean what happened was acceptable. It means we stop letting it run our lives.\n\nForgiving ourselves is often the hardest amend.",
            "Forgiveness is giving up hope for a better past.",
            &["Forgiveness", "Amends", "Compassion"],
            &["Write a letter you will not send", "Include yourself on your amends list", "Pray for willingness to forgive"],
            &[72, 140, 245, 260, 340],
        ),
        theme(
            "humility",
            "Humility",
            "Seeing ourselves as we really are.",
            "Readings on humility in recovery: right-sizing ourselves and staying teachable.",
            "Humility is an honest view of ourselves: not better, not worse.\n\nA humble heart stays *teachable*.",
            "Humility is not thinking less of ourselves, it is thinking of ourselves less.",
            &["Humility", "Open-mindedness", "Teachability"],
            &["Ask for help once today", "Listen more than you talk in a meeting", "Admit a mistake quickly"],
            &[183, 190, 205, 280, 290],
        ),
        theme(
            "patience",
            "Patience",
            "Progress, not perfection.",
            "Readings on patience in recovery: letting change take the time it takes.",
            "We did not get sick overnight and we do not get well overnight.\n\nPatience with ourselves is part of the work.",
            "Time takes time.",
            &["Patience", "Progress", "Self-compassion"],
            &["Count progress, not perfection", "Breathe before replying", "Give it ninety days"],
            &[25, 110, 175, 233, 305],
        ),
        theme(
            "hope",
            "Hope",
            "Believing things can get better.",
            "Readings on hope in recovery: stories and practices for the days when change feels impossible.",
            "Hope is contagious. We borrow it from people who are further along until we have our own.\n\nEvery day clean is evidence that change is possible.",
            "We came to believe that we could recover.",
            &["Hope", "Faith", "Miracles"],
            &["Listen for one story like yours", "Write down one thing that has improved", "Stay for the end of the meeting"],
            &[32, 45, 90, 150, 365],
        ),
        theme(
            "self-care",
            "Self-Care",
            "Looking after the body, mind and spirit that carry our recovery.",
            "Readings on self-care in recovery: rest, food, boundaries and the basics that keep us well.",
            "HALT: hungry, angry, lonely, tired. Most bad days start with one of these.\n\nSelf-care is not selfish, it is maintenance.",
            "We cannot give what we do not have.",
            &["Self-Care", "Boundaries", "Balance"],
            &["Check HALT before big decisions", "Keep one boundary today", "Go to bed on time"],
            &[15, 80, 170, 230, 320],
        ),
        theme(
            "relationships",
            "Relationships",
            "Learning to be part of, not apart from.",
            "Readings on relationships in recovery: honesty, boundaries and showing up for the people in our lives.",
            "Addiction isolates. Recovery reconnects us with family, friends and fellowship.\n\nHealthy relationships are built on honesty and kept with boundaries.",
            "We learned to be a friend among friends.",
            &["Relationships", "Family", "Intimacy", "Honesty"],
            &["Call one person just to listen", "Say no kindly once this week", "Share honestly with someone you trust"],
            &[40, 120, 195, 270, 345],
        ),
    ]
}

pub fn books() -> Vec<Book> {
    vec![
        Book {
            title: "Daybook: A Year of Recovery Readings".to_string(),
            slug: "daybook".to_string(),
            subtitle: "366 daily meditations".to_string(),
            description: "Every reading on this site, collected in one volume.\n\nEach day offers an opening reflection, a quote from recovery literature, a thought for the day and a practical application. Bound in a soft cover that fits in a bag or a jacket pocket.".to_string(),
            purchase_url: "https://store.daybook.example.org/daybook".to_string(),
            cover_image: "assets/books/daybook.jpg".to_string(),
        },
        Book {
            title: "Twelve Steps, Twelve Months".to_string(),
            slug: "twelve-steps-twelve-months".to_string(),
            subtitle: "A step study through the calendar".to_string(),
            description: "A month-by-month workbook for the Twelve Steps.\n\nEach chapter pairs one step with its principle, reflection questions and weekly exercises, following the same calendar the daily readings use.".to_string(),
            purchase_url: "https://store.daybook.example.org/twelve-months".to_string(),
            cover_image: "assets/books/twelve-months.jpg".to_string(),
        },
        Book {
            title: "The Daybook Journal".to_string(),
            slug: "daybook-journal".to_string(),
            subtitle: "Space to write, one day at a time".to_string(),
            description: "A guided journal with a page for every day of the year.\n\nPrompts for gratitude, a nightly inventory and **one thing to carry forward** into tomorrow.".to_string(),
            purchase_url: "https://store.daybook.example.org/journal".to_string(),
            cover_image: "assets/books/journal.jpg".to_string(),
        },
    ]
}

pub fn static_pages() -> Vec<StaticPage> {
    vec![
        StaticPage {
            slug: "about".to_string(),
            title: "About".to_string(),
            description: "Who writes the daily readings and how the site works.".to_string(),
            body: r#"# About Daybook

Daybook publishes one reading for every day of the year, written by people
in recovery for people in recovery.

Each month follows one of the **Twelve Steps**, and every reading is tagged
with a theme so you can follow a thread such as acceptance or gratitude
across the year.

Nothing here replaces a meeting, a sponsor or professional help. It is one
more tool for the day."#
                .to_string(),
        },
        StaticPage {
            slug: "privacy".to_string(),
            title: "Privacy".to_string(),
            description: "What we collect when you read and rate the daily readings.".to_string(),
            body: r#"# Privacy

We do not use advertising trackers.

When you rate a reading we store the rating and the day it belongs to,
nothing else. Member shares are published only after review and only under
the display name you choose.

To have a share removed, use the contact page."#
                .to_string(),
        },
        StaticPage {
            slug: "contact".to_string(),
            title: "Contact".to_string(),
            description: "Get in touch about the readings, your share, or the books.".to_string(),
            body: r#"# Contact

Questions about a reading, a correction, or a share you submitted?
Write to [hello@daybook.example.org](mailto:hello@daybook.example.org).

If you are in crisis, please contact your local emergency number or a
helpline in your country."#
                .to_string(),
        },
    ]
}
