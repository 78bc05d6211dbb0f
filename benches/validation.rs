use criterion::{Criterion, criterion_group, criterion_main};
use qladmin::ConfigurationDocument;
use qladmin::ui::{CoreForm, IrcForm, PickupForm, SettingsForm, status_line};
use qladmin::validation::{FieldCollector, core_options, irc, lists};
use std::hint::black_box;

fn bench_form_parsing(c: &mut Criterion) {
    let doc = ConfigurationDocument::default();
    let core = CoreForm::from_options(&doc.core);
    let irc_form = IrcForm::from_options(&doc.irc);
    let pickup = PickupForm::from_options(&doc.pickup);

    let mut group = c.benchmark_group("form_parse");
    group.bench_function("core", |b| b.iter(|| black_box(&core).parse()));
    group.bench_function("irc", |b| b.iter(|| black_box(&irc_form).parse()));
    group.bench_function("pickup", |b| b.iter(|| black_box(&pickup).parse()));
    group.finish();
}

fn bench_field_validators(c: &mut Criterion) {
    c.bench_function("collector_all_failures", |b| {
        b.iter(|| {
            let mut fields = FieldCollector::new();
            fields.check(core_options::OWNER_NAME, black_box("two words"), core_options::owner_name);
            fields.check(irc::CHANNEL, black_box("no-hash"), irc::channel);
            fields.check(irc::BOT_NICK, black_box("9lives"), irc::bot_nick);
            fields.check(lists::BAN_DURATION, black_box("-1"), lists::ban_duration);
            fields.finish()
        })
    });

    c.bench_function("vote_text_normalize", |b| {
        b.iter(|| lists::vote_text(black_box("  Map    Campgrounds   ")))
    });
}

fn bench_status_line(c: &mut Criterion) {
    let mut doc = ConfigurationDocument::default();
    doc.irc.is_active = true;
    doc.motd.is_active = true;
    doc.pickup.is_active = true;

    c.bench_function("status_line", |b| b.iter(|| status_line(black_box(&doc))));
}

criterion_group!(
    benches,
    bench_form_parsing,
    bench_field_validators,
    bench_status_line
);
criterion_main!(benches);
