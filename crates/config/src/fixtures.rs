//! Built-in PulseCare data used when no config file overrides it.

use chrono::NaiveDate;
use supportdesk_core::{KnowledgeArticle, Message, Sentiment};

pub const CONFIRMATION_SUFFIX: &str =
    "Let me know once you try that so I can keep an eye on the real-time diagnostics.";

pub const FALLBACK_REPLY: &str = "Thanks, Jamie! I'm syncing diagnostics now. Give me a moment and I'll follow up with the best next step.";

pub const FALLBACK_TOPIC: &str = "Follow-up";

pub const CUSTOM_REPLY_TOPIC: &str = "Custom reply";

pub const ESCALATION_REPLY: &str = "Looping in Tier 2 support to monitor the firmware. I'll stay with you until we confirm it's stable.";

pub fn canned_replies() -> Vec<String> {
    vec![
        "Thanks for sharing those details—can you confirm if the sensor LED is solid or blinking red?".into(),
        "I'm seeing a firmware patch that addresses this. I can push it manually if you’re online for the next 5 minutes.".into(),
        "Since you're on Premium Plus, I can fast-track a replacement if we can't restore it remotely.".into(),
    ]
}

pub fn knowledge_articles() -> Vec<KnowledgeArticle> {
    vec![
        KnowledgeArticle {
            id: "kb-101".into(),
            title: "Restore Offline Sensors".into(),
            summary: "Quick checklist to bring sensors back online via the PulseCare mobile app.".into(),
            response: "Hi Jamie! When a sensor goes offline, open the PulseCare app, tap the device, and choose 'Run Diagnostics'. This will guide you through reconnecting to Wi-Fi. If the LED stays red for more than 15 seconds, hold the side button for 8 seconds to reboot the sensor.".into(),
            keywords: vec!["offline".into(), "sensor".into(), "Wi-Fi".into(), "diagnostic".into()],
            last_updated: NaiveDate::from_ymd_opt(2024, 3, 28),
            confidence: 0.92,
        },
        KnowledgeArticle {
            id: "kb-204".into(),
            title: "Subscription Renewal Grace Period".into(),
            summary: "Explains billing grace periods and how to retry payments.".into(),
            response: "We've got you covered! Your PulseCare Plus subscription has a 14-day grace period. You can retry the payment under Billing > Subscriptions. If you need extra time, I'm happy to apply a one-time 7-day extension.".into(),
            keywords: vec!["subscription".into(), "billing".into(), "payment".into(), "grace".into()],
            last_updated: NaiveDate::from_ymd_opt(2024, 2, 15),
            confidence: 0.87,
        },
        KnowledgeArticle {
            id: "kb-312".into(),
            title: "Same-Day Replacement Policy".into(),
            summary: "Eligibility and process for fast-track replacement shipping.".into(),
            response: "I can arrange a same-day replacement since you're a Premium Plus member in a covered metro area. Once confirmed, you'll receive a pre-paid return label, and the replacement ships out within 2 hours.".into(),
            keywords: vec!["replacement".into(), "shipping".into(), "premium".into(), "metro".into()],
            last_updated: NaiveDate::from_ymd_opt(2024, 4, 2),
            confidence: 0.95,
        },
    ]
}

pub fn seed_messages() -> Vec<Message> {
    vec![
        Message::customer(
            "Hey, sensor on my living room camera keeps going offline with a red LED. App can't reconnect.",
            "9:22 AM",
        )
        .with_id("msg-1")
        .with_sentiment(Sentiment::Negative)
        .with_topic("Device offline"),
        Message::agent(
            "Thanks for flagging, Jamie! Let me pull the diagnostics for that sensor—one moment while I check the signal strength history.",
            "9:23 AM",
        )
        .with_id("msg-2")
        .with_sentiment(Sentiment::Neutral)
        .with_topic("Diagnostics"),
        Message::customer(
            "App shows 2.4GHz signal strong. Started right after latest firmware update yesterday.",
            "9:24 AM",
        )
        .with_id("msg-3")
        .with_sentiment(Sentiment::Neutral)
        .with_topic("Firmware"),
    ]
}
